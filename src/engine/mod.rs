//! The statechart runtime.
//!
//! This module turns a configuration tree into a live containment hierarchy
//! and drives it:
//!
//! - **Transitions**: guarded, actioned edges resolving to target paths
//! - **States**: enter/exit hooks, transitions, and owned regions
//! - **Machines**: sibling states with one current state each
//! - **Statechart**: the root machine and its public API
//!
//! # Routing
//!
//! A trigger such as `"player:pause"` is split into segments. Every segment
//! but the last names a region below the current state; the last one is
//! matched against the transitions of the state current in that region.
//! Targets are routed relative to the state that fired: a fragment naming one
//! of its regions descends, anything else is offered to its machine and then
//! to each ancestor machine in turn until one owns a state with that name.

mod arena;
mod chart;
mod error;
mod machine;
mod state;
mod transition;

pub use chart::Statechart;
pub use error::ChartError;
pub use transition::{Action, Target, TargetResolver, Targets, Transition};
