//! The root statechart: public driving and query API.

use crate::config::MachineConfig;
use crate::core::{Path, StateHistory};
use crate::engine::arena::{MachineId, Tree};
use crate::engine::error::ChartError;
use std::fmt;
use stillwater::validation::Validation;
use tracing::debug;

/// A root machine and everything it contains.
///
/// The chart is generic over the argument type `A` handed to every guard,
/// action, target resolver and hook.
///
/// # Example
///
/// ```rust
/// use statechart::builder::{StateBuilder, StateMachineBuilder, TransitionBuilder};
/// use statechart::Statechart;
///
/// # fn main() -> Result<(), statechart::builder::BuildError> {
/// let config = StateMachineBuilder::new()
///     .initial("idle")
///     .state(
///         "idle",
///         StateBuilder::new().transition(
///             TransitionBuilder::on("go").to("running").when(|speed: &i32| *speed > 0),
///         )?,
///     )?
///     .state("running", StateBuilder::new())?
///     .build();
///
/// let mut chart = Statechart::start(config, &0);
/// assert!(chart.is_in_state("idle"));
///
/// chart.trigger("go", &-1);
/// assert!(chart.is_in_state("idle"));
///
/// chart.trigger("go", &1);
/// assert!(chart.is_in_state("running"));
/// # Ok(())
/// # }
/// ```
pub struct Statechart<A> {
    tree: Tree<A>,
    root: MachineId,
}

impl<A> Statechart<A> {
    /// Build the whole tree from `config`. Nothing is active until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(config: MachineConfig<A>) -> Self {
        let mut tree = Tree::new();
        let root = tree.insert_machine(None, None, config);
        Self { tree, root }
    }

    /// Validate `config` first and refuse to build when anything is wrong.
    pub fn try_new(config: MachineConfig<A>) -> Result<Self, ChartError> {
        match config.validate() {
            Validation::Success(_) => Ok(Self::new(config)),
            Validation::Failure(violations) => Err(ChartError::InvalidConfig(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// Build and initialize in one step.
    pub fn start(config: MachineConfig<A>, args: &A) -> Self {
        let mut chart = Self::new(config);
        chart.initialize(args);
        chart
    }

    /// Activate the initial state, cascading into every region it owns.
    ///
    /// Runs once; later calls on an active chart are ignored.
    pub fn initialize(&mut self, args: &A) {
        if self.is_initialized() {
            debug!("statechart already initialized");
            return;
        }
        self.tree.init_machine(self.root, args);
    }

    /// Fire a colon-delimited trigger.
    ///
    /// Leading segments address regions below the current state; the last
    /// segment is the trigger token. Unmatched triggers, false guards and
    /// unresolvable targets are silently ignored.
    pub fn trigger(&mut self, trigger: &str, args: &A) {
        let path = Path::parse(trigger);
        debug!(trigger = %path, "trigger");
        self.tree.trigger_machine(self.root, &path, 0, args);
    }

    /// Would [`trigger`](Self::trigger) find an enabled transition? Runs
    /// guards only.
    pub fn can_trigger(&self, trigger: &str, args: &A) -> bool {
        let path = Path::parse(trigger);
        self.tree.machine_can_trigger(self.root, &path, 0, args)
    }

    /// Shallow check against the root's current state. Only the first
    /// segment of `state` is compared.
    pub fn is_in_state(&self, state: &str) -> bool {
        self.tree.machine_is_in_state(self.root, &Path::parse(state))
    }

    /// Deep check along `state:region:state...`.
    pub fn is_active(&self, path: &str) -> bool {
        self.tree
            .machine_is_active(self.root, Path::parse(path).segments())
    }

    /// Name of the root's current state.
    pub fn current_state(&self) -> Option<&str> {
        self.tree
            .machine(self.root)
            .current
            .map(|id| self.tree.state(id).name.as_str())
    }

    /// Every active state, fully qualified, parents before their regions.
    pub fn active_paths(&self) -> Vec<Path> {
        let mut out = Vec::new();
        self.tree.collect_active(self.root, &Path::root(), &mut out);
        out
    }

    pub fn is_initialized(&self) -> bool {
        self.tree.machine(self.root).current.is_some()
    }

    /// Install a new region `name` under the state addressed by `target`
    /// (`state[:region:state...]`).
    ///
    /// The region is built immediately but only becomes active the next
    /// time its state is entered.
    pub fn add_region(
        &mut self,
        target: &str,
        name: &str,
        config: MachineConfig<A>,
    ) -> Result<(), ChartError> {
        let path = Path::parse(target);
        self.tree
            .add_machine_region(self.root, &path, path.segments(), name, config)?;
        Ok(())
    }

    /// Activations recorded since construction (or the last clear).
    pub fn history(&self) -> &StateHistory {
        &self.tree.history
    }

    pub fn clear_history(&mut self) {
        self.tree.history.clear();
    }
}

impl<A> fmt::Debug for Statechart<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active: Vec<String> = self.active_paths().iter().map(ToString::to_string).collect();
        f.debug_struct("Statechart")
            .field("machines", &self.tree.machines.len())
            .field("states", &self.tree.states.len())
            .field("active", &active)
            .finish()
    }
}
