//! Problems found while validating a configuration tree.

use thiserror::Error;

/// A single configuration problem.
///
/// None of these stop a chart from being built: the engine tolerates all of
/// them at runtime by ignoring whatever cannot be routed. Validation reports
/// them so they can be caught before that happens.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Machine '{machine}' has no initial state and will never activate")]
    MissingInitialState { machine: String },

    #[error("Machine '{machine}' starts in '{initial}', which it does not declare")]
    UnknownInitialState { machine: String, initial: String },

    #[error("Transition '{trigger}' on '{state}' targets '{target}', which resolves nowhere")]
    UnresolvableTarget {
        state: String,
        trigger: String,
        target: String,
    },

    #[error("Transition '{trigger}' on '{state}' can never fire: an earlier unguarded transition takes the same trigger")]
    ShadowedTransition { state: String, trigger: String },
}
