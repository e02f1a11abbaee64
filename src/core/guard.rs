//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over the trigger arguments. They decide
//! whether a transition may fire and must not touch engine state.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// A guard is evaluated both by dry-run queries (`can_trigger`) and by the
/// real trigger, so it must return the same answer for the same arguments.
///
/// # Example
///
/// ```rust
/// use statechart::core::Guard;
///
/// let positive = Guard::new(|speed: &i32| *speed > 0);
///
/// assert!(positive.check(&5));
/// assert!(!positive.check(&-1));
/// ```
pub struct Guard<A> {
    predicate: Arc<dyn Fn(&A) -> bool + Send + Sync>,
}

impl<A> Guard<A> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that always passes. Transitions without a condition behave as
    /// if they carried this one.
    pub fn always() -> Self
    where
        A: 'static,
    {
        Guard::new(|_: &A| true)
    }

    /// Check if the guard allows the transition for these arguments.
    pub fn check(&self, args: &A) -> bool {
        (self.predicate)(args)
    }
}

impl<A> Clone for Guard<A> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<A> fmt::Debug for Guard<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
