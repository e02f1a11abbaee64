//! Static, serde-readable chart definitions.
//!
//! A definition carries everything that can be written down as data: state
//! names, initial states, trigger tokens, literal targets and regions. Hooks,
//! guards, actions and computed targets are code and get attached to the
//! resulting [`MachineConfig`] afterwards.

use super::{MachineConfig, StateConfig};
use crate::builder::{validate_name, BuildError, TransitionBuilder};
use crate::engine::Targets;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A machine: an optional `initialState` plus one entry per state.
///
/// ```json
/// {
///   "initialState": "idle",
///   "idle": { "transitions": [{ "trigger": "go", "target": "running" }] },
///   "running": {}
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<String>,

    #[serde(flatten)]
    pub states: BTreeMap<String, StateDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateDefinition {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<TransitionDefinition>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub regions: BTreeMap<String, MachineDefinition>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionDefinition {
    pub trigger: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetDefinition>,
}

/// A literal target: one colon-delimited path or a list of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetDefinition {
    One(String),
    Many(Vec<String>),
}

impl From<TargetDefinition> for Targets {
    fn from(target: TargetDefinition) -> Self {
        match target {
            TargetDefinition::One(path) => Targets::from(path),
            TargetDefinition::Many(paths) => Targets::from(paths),
        }
    }
}

impl<A> MachineConfig<A> {
    /// Turn a static definition into a configuration with default hooks.
    pub fn from_definition(definition: MachineDefinition) -> Result<Self, BuildError> {
        let mut states = Vec::with_capacity(definition.states.len());

        for (name, state) in definition.states {
            validate_name(&name)?;
            let mut config = StateConfig::new();

            for transition in state.transitions {
                let mut builder = TransitionBuilder::on(transition.trigger);
                if let Some(target) = transition.target {
                    builder = builder.to(target);
                }
                config.transitions.push(builder.build()?);
            }

            for (region_name, region) in state.regions {
                validate_name(&region_name)?;
                config
                    .regions
                    .push((region_name, MachineConfig::from_definition(region)?));
            }

            states.push((name, config));
        }

        Ok(Self {
            initial_state: definition.initial_state,
            states,
        })
    }
}
