//! Activation history tracking.
//!
//! Every time a machine (root or region) makes a state current, the engine
//! records one [`StateTransition`]. The history is a diagnostic log of what
//! happened; it is never used for routing.

use super::path::Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single activation inside one machine.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Path, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     machine: Path::root(),
///     from: Some("idle".to_string()),
///     to: "running".to_string(),
///     trigger: Some(Path::parse("go")),
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_bootstrap());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Address of the machine that changed: empty for the root, otherwise
    /// `state:region[:state:region...]`.
    pub machine: Path,
    /// The state that was current before, if any
    pub from: Option<String>,
    /// The state that became current
    pub to: String,
    /// Trigger that caused the activation; `None` for initialization
    pub trigger: Option<Path>,
    /// When the activation occurred
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    /// True if this activation came from machine initialization rather than
    /// a trigger.
    pub fn is_bootstrap(&self) -> bool {
        self.trigger.is_none()
    }
}

/// Ordered history of activations across a whole statechart.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Path, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     machine: Path::root(),
///     from: None,
///     to: "idle".to_string(),
///     trigger: None,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     machine: Path::root(),
///     from: Some("idle".to_string()),
///     to: "running".to_string(),
///     trigger: Some(Path::parse("go")),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(&Path::root()), vec!["idle", "running"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append an activation.
    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Get the states one machine passed through.
    ///
    /// Starts with the `from` state of that machine's first recorded
    /// activation when there was one, followed by every `to` in order.
    pub fn get_path(&self, machine: &Path) -> Vec<&str> {
        let mut path = Vec::new();
        let mut records = self.transitions.iter().filter(|t| &t.machine == machine);
        if let Some(first) = records.next() {
            if let Some(from) = &first.from {
                path.push(from.as_str());
            }
            path.push(first.to.as_str());
        }
        path.extend(records.map(|t| t.to.as_str()));
        path
    }

    /// Calculate total duration from first to last activation.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all activations in the order they happened.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Drop every recorded activation.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
