//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Guard, SEPARATOR};
use crate::engine::{Action, Target, Targets, Transition};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// Only the trigger is required. Without a target the transition is
/// internal: it runs its action and leaves the state unchanged.
pub struct TransitionBuilder<A> {
    trigger: Option<String>,
    guard: Option<Guard<A>>,
    action: Option<Action<A>>,
    target: Target<A>,
}

impl<A> TransitionBuilder<A> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            trigger: None,
            guard: None,
            action: None,
            target: Target::None,
        }
    }

    /// Start a builder for `trigger`.
    pub fn on(trigger: impl Into<String>) -> Self {
        Self::new().trigger(trigger)
    }

    /// Set the trigger token (required).
    pub fn trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Set one or more literal target paths.
    pub fn to(mut self, target: impl Into<Targets>) -> Self {
        self.target = Target::Static(target.into());
        self
    }

    /// Compute the targets from the trigger arguments when the transition
    /// fires.
    pub fn to_fn<F, T>(mut self, resolve: F) -> Self
    where
        F: Fn(&A) -> T + Send + Sync + 'static,
        T: Into<Targets>,
    {
        self.target = Target::Dynamic(Arc::new(move |args: &A| resolve(args).into()));
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<A>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action run when the transition fires (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<A>, BuildError> {
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;
        if trigger.is_empty() {
            return Err(BuildError::EmptyTrigger);
        }
        if trigger.contains(SEPARATOR) {
            return Err(BuildError::InvalidTrigger { trigger });
        }

        if let Target::Static(targets) = &self.target {
            if let Some(bad) = targets.paths().iter().find(|p| p.has_empty_segment()) {
                return Err(BuildError::EmptyTargetSegment {
                    target: bad.to_string(),
                });
            }
        }

        Ok(Transition {
            trigger,
            guard: self.guard,
            action: self.action,
            target: self.target,
        })
    }
}

impl<A> Default for TransitionBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
