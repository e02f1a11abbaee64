//! Builder for constructing states.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::builder::validate_name;
use crate::config::{MachineConfig, StateConfig};
use crate::core::{FnHooks, Path, StateHooks};
use crate::engine::Transition;
use std::sync::Arc;

enum Hooks<A> {
    Closures(FnHooks<A>),
    Custom(Arc<dyn StateHooks<A>>),
}

/// Builder for one state: hooks, transitions and regions.
///
/// Closure hooks and [`hooks`](Self::hooks) replace each other; whichever
/// was set last wins.
pub struct StateBuilder<A> {
    hooks: Hooks<A>,
    transitions: Vec<Transition<A>>,
    regions: Vec<(String, MachineConfig<A>)>,
}

impl<A> StateBuilder<A> {
    pub fn new() -> Self {
        Self {
            hooks: Hooks::Closures(FnHooks::new()),
            transitions: Vec::new(),
            regions: Vec::new(),
        }
    }

    fn take_closures(&mut self) -> FnHooks<A> {
        match std::mem::replace(&mut self.hooks, Hooks::Closures(FnHooks::new())) {
            Hooks::Closures(hooks) => hooks,
            Hooks::Custom(_) => FnHooks::new(),
        }
    }

    /// Run `f` whenever the state becomes current.
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Path>, &A) + Send + Sync + 'static,
    {
        let hooks = self.take_closures();
        self.hooks = Hooks::Closures(hooks.with_enter(f));
        self
    }

    /// Run `f` whenever the state stops being current. Returning `Some`
    /// replaces the arguments the next state is entered with.
    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&A) -> Option<A> + Send + Sync + 'static,
    {
        let hooks = self.take_closures();
        self.hooks = Hooks::Closures(hooks.with_exit(f));
        self
    }

    /// Use a [`StateHooks`] implementation instead of closures.
    pub fn hooks<H>(mut self, hooks: H) -> Self
    where
        H: StateHooks<A> + 'static,
    {
        self.hooks = Hooks::Custom(Arc::new(hooks));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<A>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<A>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add an orthogonal region.
    pub fn region(
        mut self,
        name: impl Into<String>,
        config: MachineConfig<A>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        validate_name(&name)?;
        if self.regions.iter().any(|(n, _)| *n == name) {
            return Err(BuildError::DuplicateRegion { name });
        }
        self.regions.push((name, config));
        Ok(self)
    }

    /// Build the state configuration.
    pub fn build(self) -> StateConfig<A>
    where
        A: 'static,
    {
        let mut config = StateConfig::new();
        match self.hooks {
            Hooks::Closures(hooks) if hooks.is_empty() => {}
            Hooks::Closures(hooks) => config.set_hooks(hooks),
            Hooks::Custom(hooks) => config.hooks = hooks,
        }
        config.transitions = self.transitions;
        config.regions = self.regions;
        config
    }
}

impl<A> Default for StateBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
