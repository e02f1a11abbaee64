//! Routing primitives owned by a single state.
//!
//! A state resolves depth-1 triggers against its own transitions and
//! forwards deeper paths into the region named by the next segment. It never
//! activates a sibling directly: unresolved target fragments go to its owning
//! machine, which either activates the sibling or bubbles further up.

use crate::config::MachineConfig;
use crate::core::Path;
use crate::engine::arena::{MachineId, StateId, StateNode, Tree};
use crate::engine::error::ChartError;
use crate::engine::transition::Transition;
use tracing::debug;

impl<A> StateNode<A> {
    /// Transitions answering to `token` whose guard currently passes, in
    /// declaration order. Callers take the first.
    pub(crate) fn matching_transitions<'a>(
        &'a self,
        token: &'a str,
        args: &'a A,
    ) -> impl Iterator<Item = &'a Transition<A>> + 'a {
        self.transitions
            .iter()
            .filter(move |t| t.matches(token))
            .filter(move |t| t.can_execute(args))
    }
}

/// A transition that was taken: the targets it produced and what the
/// firing state's exit hook returned.
pub(crate) struct Fired<A> {
    pub(crate) targets: Vec<Path>,
    pub(crate) exit_args: Option<A>,
}

/// The state whose transition is being routed. It has already exited.
pub(crate) struct Departure<A> {
    pub(crate) state: StateId,
    pub(crate) exit_args: Option<A>,
}

/// Segments of `path` not yet consumed by the machines above.
fn remaining(path: &Path, depth: usize) -> &[String] {
    path.segments().get(depth..).unwrap_or(&[])
}

impl<A> Tree<A> {
    /// Run the enter hook, then initialize every owned region with the same
    /// arguments.
    pub(crate) fn enter_state(&mut self, id: StateId, origin: Option<&Path>, args: &A) {
        let state = self.state(id);
        debug!(state = %state.name, origin = ?origin.map(ToString::to_string), "entering state");
        state.hooks.on_enter(origin, args);

        let regions: Vec<MachineId> = state.regions.values().copied().collect();
        for region in regions {
            self.init_machine(region, args);
        }
    }

    /// Run the exit hook. `None` means the arguments pass through unchanged.
    pub(crate) fn exit_state(&self, id: StateId, args: &A) -> Option<A> {
        let state = self.state(id);
        debug!(state = %state.name, "exiting state");
        state.hooks.on_exit(args)
    }

    /// Dry-run of [`Tree::trigger_state`]: no action runs and nothing moves.
    pub(crate) fn state_has_transition(
        &self,
        id: StateId,
        path: &Path,
        depth: usize,
        args: &A,
    ) -> bool {
        let state = self.state(id);
        match remaining(path, depth) {
            [] => false,
            [token] => state.matching_transitions(token, args).next().is_some(),
            [region, ..] => state
                .regions
                .get(region)
                .is_some_and(|&r| self.machine_can_trigger(r, path, depth + 1, args)),
        }
    }

    /// Fire the trigger addressed to this state.
    ///
    /// At depth 1 the first enabled transition is taken: this state exits,
    /// the action runs, and the targets come back for the owning machine to
    /// route. Deeper paths are handed to the named region, which routes its
    /// own targets, so nothing comes back.
    pub(crate) fn trigger_state(
        &mut self,
        id: StateId,
        path: &Path,
        depth: usize,
        args: &A,
    ) -> Option<Fired<A>> {
        let state = self.state(id);
        match remaining(path, depth) {
            [] => None,
            [token] => {
                let Some(index) = state
                    .transitions
                    .iter()
                    .position(|t| t.matches(token) && t.can_execute(args))
                else {
                    debug!(state = %state.name, trigger = %path, "no enabled transition");
                    return None;
                };
                let exit_args = self.exit_state(id, args);
                let targets = self.state(id).transitions[index].execute(args);
                Some(Fired { targets, exit_args })
            }
            [region, ..] => {
                match state.regions.get(region).copied() {
                    Some(machine) => self.trigger_machine(machine, path, depth + 1, args),
                    None => {
                        debug!(state = %state.name, region = %region, trigger = %path, "no such region")
                    }
                }
                None
            }
        }
    }

    /// Whether this state and every state owning it are current.
    pub(crate) fn state_is_active(&self, id: StateId) -> bool {
        let machine = self.machine(self.state(id).machine);
        machine.current == Some(id) && machine.parent.is_none_or(|p| self.state_is_active(p))
    }

    /// Resolve one target fragment relative to this state.
    ///
    /// A multi-segment fragment whose head names an owned region descends
    /// into it. Anything else goes to the owning machine unchanged.
    pub(crate) fn handle_state_transition(
        &mut self,
        id: StateId,
        trigger: &Path,
        target: &[String],
        departure: &Departure<A>,
        args: &A,
    ) {
        let Some(head) = target.first() else {
            return;
        };

        if target.len() > 1 {
            if let Some(&region) = self.state(id).regions.get(head) {
                self.handle_machine_transition(region, trigger, &target[1..], departure, args);
                return;
            }
        }

        let owner = self.state(id).machine;
        self.handle_machine_transition(owner, trigger, target, departure, args);
    }

    /// Install a region below this state, or descend into the region named
    /// by the next segment of `target`.
    pub(crate) fn add_state_region(
        &mut self,
        id: StateId,
        full: &Path,
        target: &[String],
        name: &str,
        config: MachineConfig<A>,
    ) -> Result<MachineId, ChartError> {
        match target.split_first() {
            None => {
                if self.state(id).regions.contains_key(name) {
                    return Err(ChartError::RegionExists {
                        state: self.state_path(id).to_string(),
                        region: name.to_string(),
                    });
                }
                let region = self.insert_machine(Some(id), Some(name.to_string()), config);
                self.states[id.0].regions.insert(name.to_string(), region);
                debug!(state = %self.state(id).name, region = %name, "added region");
                Ok(region)
            }
            Some((head, rest)) => {
                let region = self.state(id).regions.get(head).copied().ok_or_else(|| {
                    ChartError::UnknownTarget {
                        target: full.to_string(),
                        segment: head.clone(),
                    }
                })?;
                self.add_machine_region(region, full, rest, name, config)
            }
        }
    }
}
