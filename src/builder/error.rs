//! Build errors for statechart builders.

use thiserror::Error;

/// Errors that can occur when building states, machines and transitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Transition trigger not specified. Use TransitionBuilder::on(trigger)")]
    MissingTrigger,

    #[error("Transition trigger is empty")]
    EmptyTrigger,

    #[error("Trigger '{trigger}' contains ':'; region routing belongs in the trigger call, not the transition")]
    InvalidTrigger { trigger: String },

    #[error("Name '{name}' is empty or contains ':'")]
    InvalidName { name: String },

    #[error("State '{name}' is already declared in this machine")]
    DuplicateState { name: String },

    #[error("Region '{name}' is already declared on this state")]
    DuplicateRegion { name: String },

    #[error("Target '{target}' has an empty segment")]
    EmptyTargetSegment { target: String },
}
