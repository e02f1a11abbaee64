//! Declarative configuration trees.
//!
//! A [`MachineConfig`] describes one machine: its initial state and its
//! states, each of which may own regions that are themselves machine
//! configurations. Trees are produced by the [builders](crate::builder) or
//! parsed from a static JSON [definition](MachineDefinition), and consumed
//! by [`Statechart::new`](crate::Statechart::new).
//!
//! # Example
//!
//! ```rust
//! use statechart::config::MachineConfig;
//!
//! let json = r#"{
//!     "initialState": "idle",
//!     "idle": { "transitions": [{ "trigger": "go", "target": "running" }] },
//!     "running": {}
//! }"#;
//!
//! let config: MachineConfig<()> = MachineConfig::from_json(json).unwrap();
//! assert_eq!(config.initial_state(), Some("idle"));
//! assert!(config.validate().is_success());
//! ```

mod definition;
mod validation;
mod violations;

pub use definition::{MachineDefinition, StateDefinition, TargetDefinition, TransitionDefinition};
pub use violations::ConfigViolation;

use crate::core::{NoHooks, StateHooks};
use crate::engine::{ChartError, Transition};
use std::fmt;
use std::sync::Arc;

/// Configuration of one machine (the root or a region).
pub struct MachineConfig<A> {
    pub(crate) initial_state: Option<String>,
    pub(crate) states: Vec<(String, StateConfig<A>)>,
}

impl<A> MachineConfig<A> {
    /// Empty machine with no initial state.
    pub fn new() -> Self {
        Self {
            initial_state: None,
            states: Vec::new(),
        }
    }

    /// Parse a static JSON definition. Hooks can be attached afterwards
    /// through [`state_mut`](Self::state_mut).
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let definition: MachineDefinition = serde_json::from_str(json)?;
        Ok(Self::from_definition(definition)?)
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.initial_state.as_deref()
    }

    /// State names in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.states.iter().any(|(n, _)| n == name)
    }

    pub fn state(&self, name: &str) -> Option<&StateConfig<A>> {
        self.states
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, state)| state)
    }

    pub fn state_mut(&mut self, name: &str) -> Option<&mut StateConfig<A>> {
        self.states
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, state)| state)
    }
}

impl<A> Default for MachineConfig<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for MachineConfig<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineConfig")
            .field("initial_state", &self.initial_state)
            .field("states", &self.states)
            .finish()
    }
}

/// Configuration of one state.
pub struct StateConfig<A> {
    pub(crate) hooks: Arc<dyn StateHooks<A>>,
    pub(crate) transitions: Vec<Transition<A>>,
    pub(crate) regions: Vec<(String, MachineConfig<A>)>,
}

impl<A> StateConfig<A> {
    /// A state with default hooks, no transitions and no regions.
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(NoHooks),
            transitions: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Replace the state's hooks.
    pub fn set_hooks<H>(&mut self, hooks: H)
    where
        H: StateHooks<A> + 'static,
    {
        self.hooks = Arc::new(hooks);
    }

    pub fn transitions(&self) -> &[Transition<A>] {
        &self.transitions
    }

    /// Region names in declaration order.
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|(name, _)| name.as_str())
    }

    pub fn region(&self, name: &str) -> Option<&MachineConfig<A>> {
        self.regions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, region)| region)
    }

    pub fn region_mut(&mut self, name: &str) -> Option<&mut MachineConfig<A>> {
        self.regions
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, region)| region)
    }
}

impl<A> Default for StateConfig<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for StateConfig<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateConfig")
            .field("transitions", &self.transitions)
            .field("regions", &self.regions)
            .finish_non_exhaustive()
    }
}
