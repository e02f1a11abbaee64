//! Core building blocks shared by the engine and the builders.
//!
//! This module contains the pieces that carry no routing logic of their own:
//! - Colon-delimited paths
//! - Guard predicates over trigger arguments
//! - The enter/exit hook capability interface
//! - Activation history

mod guard;
mod history;
mod hooks;
mod path;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use hooks::{EnterFn, ExitFn, FnHooks, NoHooks, StateHooks};
pub use path::{Path, SEPARATOR};
