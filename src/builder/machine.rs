//! Builder for constructing machine configurations.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::builder::validate_name;
use crate::config::{MachineConfig, StateConfig};

/// Builder for one machine (the root or a region) with a fluent API.
///
/// The initial state is not required here: a machine without one is legal
/// and simply never activates. [`MachineConfig::validate`] reports it.
pub struct StateMachineBuilder<A> {
    initial: Option<String>,
    states: Vec<(String, StateConfig<A>)>,
}

impl<A> StateMachineBuilder<A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
        }
    }

    /// Set the state activated on initialization.
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add a state using a builder.
    pub fn state(self, name: impl Into<String>, state: StateBuilder<A>) -> Result<Self, BuildError>
    where
        A: 'static,
    {
        self.add_state(name, state.build())
    }

    /// Add a pre-built state.
    pub fn add_state(
        mut self,
        name: impl Into<String>,
        state: StateConfig<A>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        validate_name(&name)?;
        if self.states.iter().any(|(n, _)| *n == name) {
            return Err(BuildError::DuplicateState { name });
        }
        self.states.push((name, state));
        Ok(self)
    }

    /// Build the machine configuration.
    pub fn build(self) -> MachineConfig<A> {
        MachineConfig {
            initial_state: self.initial,
            states: self.states,
        }
    }
}

impl<A> Default for StateMachineBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
