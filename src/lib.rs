//! Statechart: a hierarchical state machine engine with orthogonal regions
//!
//! States nest: any state may own named regions, each a complete machine of
//! its own that is active for as long as its owning state is. Triggers are
//! colon-delimited paths routed down through the active regions, and targets
//! are routed back up through the ancestor machines until one can take them.
//!
//! # Core Concepts
//!
//! - **Path**: colon-delimited addresses for triggers and targets
//! - **Transitions**: guarded, actioned edges with static or computed targets
//! - **Hooks**: enter/exit callbacks, where exit may transform the arguments
//! - **Regions**: parallel sub-machines initialized with their owning state
//!
//! # Example
//!
//! ```rust
//! use statechart::builder::{StateBuilder, StateMachineBuilder, TransitionBuilder};
//! use statechart::Statechart;
//!
//! # fn main() -> Result<(), statechart::builder::BuildError> {
//! let sub = StateMachineBuilder::new()
//!     .initial("a")
//!     .state("a", StateBuilder::new().transition(TransitionBuilder::on("advance").to("b"))?)?
//!     .state("b", StateBuilder::new())?
//!     .build();
//!
//! let config = StateMachineBuilder::new()
//!     .initial("busy")
//!     .state("busy", StateBuilder::new().region("sub", sub)?)?
//!     .build();
//!
//! let mut chart = Statechart::start(config, &());
//! assert!(chart.is_active("busy:sub:a"));
//!
//! chart.trigger("sub:advance", &());
//! assert!(chart.is_active("busy:sub:b"));
//! assert!(chart.is_in_state("busy"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, StateBuilder, StateMachineBuilder, TransitionBuilder};
pub use config::{ConfigViolation, MachineConfig, StateConfig};
pub use core::{Guard, Path, StateHistory, StateHooks, StateTransition};
pub use engine::{ChartError, Statechart, Targets};
