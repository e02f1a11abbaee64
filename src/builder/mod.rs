//! Builder API for ergonomic configuration trees.
//!
//! Fluent builders produce the [`MachineConfig`](crate::config::MachineConfig)
//! trees a [`Statechart`](crate::Statechart) is built from. Names and
//! triggers are checked as they are added; whole-tree consistency is left to
//! [`MachineConfig::validate`](crate::config::MachineConfig::validate).

mod error;
mod machine;
mod state;
mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;

use crate::core::SEPARATOR;
use crate::engine::{Targets, Transition};

/// State and region names are single path segments.
pub(crate) fn validate_name(name: &str) -> Result<(), BuildError> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(BuildError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Create an unconditional transition.
///
/// # Example
///
/// ```
/// use statechart::builder::simple_transition;
///
/// let transition = simple_transition::<()>("go", "running").unwrap();
/// assert_eq!(transition.trigger(), "go");
/// ```
pub fn simple_transition<A>(
    trigger: &str,
    target: impl Into<Targets>,
) -> Result<Transition<A>, BuildError> {
    TransitionBuilder::on(trigger).to(target).build()
}

/// Create a transition with a guard predicate.
///
/// # Example
///
/// ```
/// use statechart::builder::guarded_transition;
///
/// let transition = guarded_transition("go", "running", |speed: &i32| *speed > 0).unwrap();
///
/// assert!(transition.can_execute(&1));
/// assert!(!transition.can_execute(&-1));
/// ```
pub fn guarded_transition<A, F>(
    trigger: &str,
    target: impl Into<Targets>,
    guard: F,
) -> Result<Transition<A>, BuildError>
where
    F: Fn(&A) -> bool + Send + Sync + 'static,
{
    TransitionBuilder::on(trigger).to(target).when(guard).build()
}
