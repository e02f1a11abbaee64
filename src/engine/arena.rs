//! Index-addressed storage for the containment tree.
//!
//! Machines and states live in two flat vectors. Parent links are plain ids,
//! so the tree has no reference cycles and no shared mutable aliasing. Nodes
//! are only ever appended; ids stay valid for the life of the tree.

use crate::config::MachineConfig;
use crate::core::{Path, StateHistory, StateHooks};
use crate::engine::transition::Transition;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct MachineId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StateId(pub(crate) usize);

/// A machine: sibling states plus the one that is current.
pub(crate) struct MachineNode {
    /// Region name under the parent state; `None` for the root.
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<StateId>,
    pub(crate) states: BTreeMap<String, StateId>,
    pub(crate) initial_state: Option<String>,
    pub(crate) current: Option<StateId>,
}

/// A state: hooks, outgoing transitions and owned regions.
pub(crate) struct StateNode<A> {
    pub(crate) name: String,
    /// The machine this state belongs to.
    pub(crate) machine: MachineId,
    pub(crate) hooks: Arc<dyn StateHooks<A>>,
    pub(crate) transitions: Vec<Transition<A>>,
    pub(crate) regions: BTreeMap<String, MachineId>,
}

pub(crate) struct Tree<A> {
    pub(crate) machines: Vec<MachineNode>,
    pub(crate) states: Vec<StateNode<A>>,
    pub(crate) history: StateHistory,
}

impl<A> Tree<A> {
    pub(crate) fn new() -> Self {
        Self {
            machines: Vec::new(),
            states: Vec::new(),
            history: StateHistory::new(),
        }
    }

    /// Build a machine and everything below it from `config`.
    ///
    /// Regions are created eagerly whether or not their state is ever
    /// entered.
    pub(crate) fn insert_machine(
        &mut self,
        parent: Option<StateId>,
        name: Option<String>,
        config: MachineConfig<A>,
    ) -> MachineId {
        let id = MachineId(self.machines.len());
        self.machines.push(MachineNode {
            name,
            parent,
            states: BTreeMap::new(),
            initial_state: config.initial_state,
            current: None,
        });

        for (state_name, state_config) in config.states {
            let state = StateId(self.states.len());
            self.states.push(StateNode {
                name: state_name.clone(),
                machine: id,
                hooks: state_config.hooks,
                transitions: state_config.transitions,
                regions: BTreeMap::new(),
            });

            for (region_name, region_config) in state_config.regions {
                let region = self.insert_machine(Some(state), Some(region_name.clone()), region_config);
                self.states[state.0].regions.insert(region_name, region);
            }

            self.machines[id.0].states.insert(state_name, state);
        }

        id
    }

    pub(crate) fn machine(&self, id: MachineId) -> &MachineNode {
        &self.machines[id.0]
    }

    pub(crate) fn state(&self, id: StateId) -> &StateNode<A> {
        &self.states[id.0]
    }

    /// Address of a machine: empty for the root, otherwise alternating
    /// state and region names from the root down.
    pub(crate) fn machine_path(&self, id: MachineId) -> Path {
        let machine = self.machine(id);
        match (machine.parent, &machine.name) {
            (Some(parent), Some(name)) => self.state_path(parent).child(name.clone()),
            _ => Path::root(),
        }
    }

    /// Fully qualified address of a state.
    pub(crate) fn state_path(&self, id: StateId) -> Path {
        let state = self.state(id);
        self.machine_path(state.machine).child(state.name.clone())
    }
}
