//! Accumulating validation of configuration trees.
//!
//! Every machine, state and transition in the tree is checked and all
//! problems are reported together instead of stopping at the first one.

use super::violations::ConfigViolation;
use super::{MachineConfig, StateConfig};
use crate::core::Path;
use crate::engine::Target;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Checked = Validation<(), NonEmptyVec<ConfigViolation>>;

impl<A> MachineConfig<A> {
    /// Check the whole tree, accumulating ALL violations.
    ///
    /// Reports machines that can never activate, static targets that do not
    /// resolve from the state declaring them, and transitions shadowed by an
    /// earlier unguarded transition on the same trigger.
    pub fn validate(&self) -> Checked {
        validate_machine(self, &Path::root(), &[self])
    }
}

fn label(path: &Path) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

/// `chain` runs from the root down to `machine` inclusive.
fn validate_machine<A>(
    machine: &MachineConfig<A>,
    at: &Path,
    chain: &[&MachineConfig<A>],
) -> Checked {
    let mut checks: Vec<Checked> = Vec::new();

    let initial = match machine.initial_state() {
        None => Validation::fail(ConfigViolation::MissingInitialState { machine: label(at) }),
        Some(initial) if !machine.contains_state(initial) => {
            Validation::fail(ConfigViolation::UnknownInitialState {
                machine: label(at),
                initial: initial.to_string(),
            })
        }
        Some(_) => Validation::success(()),
    };
    checks.push(initial);

    for (name, state) in &machine.states {
        let state_path = at.child(name.clone());
        checks.push(validate_transitions(state, &state_path, chain));

        for (region_name, region) in &state.regions {
            let mut region_chain = chain.to_vec();
            region_chain.push(region);
            checks.push(validate_machine(
                region,
                &state_path.child(region_name.clone()),
                &region_chain,
            ));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

fn validate_transitions<A>(
    state: &StateConfig<A>,
    state_path: &Path,
    chain: &[&MachineConfig<A>],
) -> Checked {
    let mut checks: Vec<Checked> = Vec::new();
    let mut unguarded: Vec<&str> = Vec::new();

    for transition in state.transitions() {
        let trigger = transition.trigger();
        if unguarded.contains(&trigger) {
            checks.push(Validation::fail(ConfigViolation::ShadowedTransition {
                state: state_path.to_string(),
                trigger: trigger.to_string(),
            }));
        } else if !transition.is_guarded() {
            unguarded.push(trigger);
        }

        if let Target::Static(targets) = transition.target() {
            for target in targets.paths() {
                let check = if resolves_from_state(chain, state, target.segments()) {
                    Validation::success(())
                } else {
                    Validation::fail(ConfigViolation::UnresolvableTarget {
                        state: state_path.to_string(),
                        trigger: trigger.to_string(),
                        target: target.to_string(),
                    })
                };
                checks.push(check);
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Mirrors runtime routing: descend into a named region when more segments
/// follow, otherwise look for the head among the states of the owning
/// machine and its ancestors.
fn resolves_from_state<A>(
    chain: &[&MachineConfig<A>],
    state: &StateConfig<A>,
    target: &[String],
) -> bool {
    let Some(head) = target.first() else {
        return true;
    };

    if target.len() > 1 {
        if let Some(region) = state.region(head) {
            let mut region_chain = chain.to_vec();
            region_chain.push(region);
            return resolves_in_machine(&region_chain, &target[1..]);
        }
    }
    resolves_in_machine(chain, target)
}

fn resolves_in_machine<A>(chain: &[&MachineConfig<A>], target: &[String]) -> bool {
    let Some(head) = target.first() else {
        return true;
    };

    for depth in (0..chain.len()).rev() {
        if let Some(state) = chain[depth].state(head) {
            return resolves_from_state(&chain[..=depth], state, &target[1..]);
        }
    }
    false
}
