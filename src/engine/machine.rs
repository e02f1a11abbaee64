//! Routing primitives owned by a machine (root or region).

use crate::config::MachineConfig;
use crate::core::{Path, StateTransition};
use crate::engine::arena::{MachineId, StateId, Tree};
use crate::engine::error::ChartError;
use crate::engine::state::Departure;
use chrono::Utc;
use tracing::debug;

impl<A> Tree<A> {
    /// Activate the configured initial state, if there is one.
    ///
    /// A machine without a usable initial state stays inactive.
    pub(crate) fn init_machine(&mut self, id: MachineId, args: &A) {
        let machine = self.machine(id);
        let Some(initial) = machine.initial_state.as_deref() else {
            debug!(machine = %self.machine_path(id), "no initial state, machine stays inactive");
            return;
        };
        let Some(&state) = machine.states.get(initial) else {
            debug!(machine = %self.machine_path(id), initial, "initial state is not declared, machine stays inactive");
            return;
        };

        self.activate(id, state, None);
        self.enter_state(state, None, args);
    }

    /// Make `next` current and record the activation.
    fn activate(&mut self, id: MachineId, next: StateId, trigger: Option<&Path>) {
        let previous = self.machines[id.0].current.replace(next);
        let record = StateTransition {
            machine: self.machine_path(id),
            from: previous.map(|p| self.state(p).name.clone()),
            to: self.state(next).name.clone(),
            trigger: trigger.cloned(),
            timestamp: Utc::now(),
        };
        debug!(machine = %record.machine, from = ?record.from, to = %record.to, "activated state");
        self.history.record(record);
    }

    /// Shallow membership: compares only the first segment of `state`
    /// against this machine's current state.
    pub(crate) fn machine_is_in_state(&self, id: MachineId, state: &Path) -> bool {
        match (self.machine(id).current, state.head()) {
            (Some(current), Some(name)) => self.state(current).name == name,
            _ => false,
        }
    }

    pub(crate) fn machine_can_trigger(
        &self,
        id: MachineId,
        path: &Path,
        depth: usize,
        args: &A,
    ) -> bool {
        self.machine(id)
            .current
            .is_some_and(|current| self.state_has_transition(current, path, depth, args))
    }

    /// Fire `path` (from segment `depth` on) at this machine's current state
    /// and route every resulting target independently.
    ///
    /// Targets are routed from the firing state only while it stays active;
    /// once an earlier target has moved it out, the rest are dropped.
    pub(crate) fn trigger_machine(&mut self, id: MachineId, path: &Path, depth: usize, args: &A) {
        let Some(current) = self.machine(id).current else {
            debug!(machine = %self.machine_path(id), trigger = %path, "machine inactive, trigger ignored");
            return;
        };
        let Some(fired) = self.trigger_state(current, path, depth, args) else {
            return;
        };

        let departure = Departure {
            state: current,
            exit_args: fired.exit_args,
        };
        for target in &fired.targets {
            if !self.state_is_active(current) {
                debug!(state = %self.state_path(current), target = %target, trigger = %path, "firing state left, target dropped");
                continue;
            }
            self.handle_state_transition(current, path, target.segments(), &departure, args);
        }
    }

    /// Activate the state named by the head of `target`, or bubble the whole
    /// fragment to the parent state's machine.
    ///
    /// The outgoing state exits first unless it is the departing state, which
    /// exited when its transition was taken. Its exit result (or the original
    /// arguments) is what the incoming state's enter hook sees. Remaining
    /// segments continue into the newly entered state with the original
    /// arguments.
    pub(crate) fn handle_machine_transition(
        &mut self,
        id: MachineId,
        trigger: &Path,
        target: &[String],
        departure: &Departure<A>,
        args: &A,
    ) {
        let Some(head) = target.first() else {
            return;
        };

        if let Some(&next) = self.machine(id).states.get(head) {
            let previous = self.machine(id).current;
            let exited = match previous {
                Some(previous) if previous != departure.state => self.exit_state(previous, args),
                _ => None,
            };
            let carried = if previous == Some(departure.state) {
                departure.exit_args.as_ref()
            } else {
                exited.as_ref()
            };

            self.activate(id, next, Some(trigger));
            self.enter_state(next, Some(trigger), carried.unwrap_or(args));

            if target.len() > 1 {
                self.handle_state_transition(next, trigger, &target[1..], departure, args);
            }
            return;
        }

        match self.machine(id).parent {
            Some(parent) => {
                let owner = self.state(parent).machine;
                self.handle_machine_transition(owner, trigger, target, departure, args);
            }
            None => {
                debug!(target = %Path::from(target), trigger = %trigger, "target does not resolve, dropped at root");
            }
        }
    }

    /// Descend into the state named by the head of `target` to install a
    /// region.
    pub(crate) fn add_machine_region(
        &mut self,
        id: MachineId,
        full: &Path,
        target: &[String],
        name: &str,
        config: MachineConfig<A>,
    ) -> Result<MachineId, ChartError> {
        let Some((head, rest)) = target.split_first() else {
            return Err(ChartError::UnknownTarget {
                target: full.to_string(),
                segment: String::new(),
            });
        };

        let state = self.machine(id).states.get(head).copied().ok_or_else(|| {
            ChartError::UnknownTarget {
                target: full.to_string(),
                segment: head.clone(),
            }
        })?;
        self.add_state_region(state, full, rest, name, config)
    }

    /// Deep membership along `state:region:state...`. A trailing region
    /// segment asks whether that region is active at all.
    pub(crate) fn machine_is_active(&self, id: MachineId, path: &[String]) -> bool {
        let Some(current) = self.machine(id).current else {
            return false;
        };
        let Some((head, rest)) = path.split_first() else {
            return true;
        };
        let state = self.state(current);
        if state.name != *head {
            return false;
        }

        match rest.split_first() {
            None => true,
            Some((region, deeper)) => state
                .regions
                .get(region)
                .is_some_and(|&r| self.machine_is_active(r, deeper)),
        }
    }

    /// Fully qualified paths of every active state under `id`, parents
    /// before their regions.
    pub(crate) fn collect_active(&self, id: MachineId, prefix: &Path, out: &mut Vec<Path>) {
        let Some(current) = self.machine(id).current else {
            return;
        };
        let state = self.state(current);
        let path = prefix.child(state.name.clone());
        out.push(path.clone());

        for (region_name, &region) in &state.regions {
            self.collect_active(region, &path.child(region_name.clone()), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateBuilder, StateMachineBuilder};

    fn tree(initial: Option<&str>) -> (Tree<()>, MachineId) {
        let mut builder = StateMachineBuilder::new();
        if let Some(initial) = initial {
            builder = builder.initial(initial);
        }
        let config = builder
            .state("idle", StateBuilder::new())
            .unwrap()
            .state("running", StateBuilder::new())
            .unwrap()
            .build();

        let mut tree = Tree::new();
        let root = tree.insert_machine(None, None, config);
        (tree, root)
    }

    #[test]
    fn init_without_initial_state_stays_inactive() {
        for initial in [None, Some("missing")] {
            let (mut tree, root) = tree(initial);
            tree.init_machine(root, &());

            assert!(tree.machine(root).current.is_none());
            assert!(tree.history.is_empty());
        }
    }

    #[test]
    fn handle_transition_activates_and_records() {
        let (mut tree, root) = tree(Some("idle"));
        tree.init_machine(root, &());

        let trigger = Path::parse("go");
        let departure = Departure {
            state: tree.machine(root).states["idle"],
            exit_args: None,
        };
        tree.handle_machine_transition(
            root,
            &trigger,
            Path::parse("running").segments(),
            &departure,
            &(),
        );

        assert!(tree.machine_is_in_state(root, &Path::parse("running")));
        let last = &tree.history.transitions()[1];
        assert_eq!(last.from.as_deref(), Some("idle"));
        assert_eq!(last.to, "running");
        assert_eq!(last.trigger, Some(trigger));
    }

    #[test]
    fn unknown_fragment_is_dropped_at_root() {
        let (mut tree, root) = tree(Some("idle"));
        tree.init_machine(root, &());

        let departure = Departure {
            state: tree.machine(root).states["idle"],
            exit_args: None,
        };
        tree.handle_machine_transition(
            root,
            &Path::parse("go"),
            Path::parse("nowhere").segments(),
            &departure,
            &(),
        );

        assert!(tree.machine_is_in_state(root, &Path::parse("idle")));
        assert_eq!(tree.history.len(), 1);
    }

    #[test]
    fn add_region_needs_a_state_segment() {
        let (mut tree, root) = tree(Some("idle"));

        let result = tree.add_machine_region(root, &Path::root(), &[], "extra", MachineConfig::new());

        assert!(matches!(result, Err(ChartError::UnknownTarget { segment, .. }) if segment.is_empty()));
    }
}
