//! Errors surfaced by the statechart facade.
//!
//! Trigger routing never fails: unmatched triggers, false guards and
//! unresolvable targets are silent no-ops. Errors only come from building,
//! validating and extending a chart.

use crate::builder::BuildError;
use crate::config::ConfigViolation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Target '{target}' does not resolve: nothing named '{segment}'")]
    UnknownTarget { target: String, segment: String },

    #[error("State '{state}' already owns a region named '{region}'")]
    RegionExists { state: String, region: String },

    #[error("Configuration has {} violation(s)", .0.len())]
    InvalidConfig(Vec<ConfigViolation>),

    #[error("Definition could not be parsed: {0}")]
    Definition(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}
