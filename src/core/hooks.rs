//! Enter/exit callbacks attached to states.

use super::path::Path;
use std::fmt;
use std::sync::Arc;

/// Capability interface a state exposes to the engine.
///
/// Both methods have explicit defaults: entering does nothing and exiting
/// leaves the arguments untouched. Implement only what a state needs.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Path, StateHooks};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct CountEntries(AtomicUsize);
///
/// impl StateHooks<()> for CountEntries {
///     fn on_enter(&self, _origin: Option<&Path>, _args: &()) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
/// ```
pub trait StateHooks<A>: Send + Sync {
    /// Called when the state becomes current.
    ///
    /// `origin` is the trigger path that caused the activation, or `None`
    /// when the state is entered by machine initialization.
    fn on_enter(&self, _origin: Option<&Path>, _args: &A) {}

    /// Called when the state stops being current.
    ///
    /// Returning `Some` replaces the arguments handed to the state entered
    /// next; `None` keeps the original arguments.
    fn on_exit(&self, _args: &A) -> Option<A> {
        None
    }
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl<A> StateHooks<A> for NoHooks {}

pub type EnterFn<A> = Arc<dyn Fn(Option<&Path>, &A) + Send + Sync>;
pub type ExitFn<A> = Arc<dyn Fn(&A) -> Option<A> + Send + Sync>;

/// Hooks assembled from closures. Unset slots fall back to the trait
/// defaults.
pub struct FnHooks<A> {
    enter: Option<EnterFn<A>>,
    exit: Option<ExitFn<A>>,
}

impl<A> FnHooks<A> {
    pub fn new() -> Self {
        Self {
            enter: None,
            exit: None,
        }
    }

    pub fn with_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Path>, &A) + Send + Sync + 'static,
    {
        self.enter = Some(Arc::new(f));
        self
    }

    pub fn with_exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&A) -> Option<A> + Send + Sync + 'static,
    {
        self.exit = Some(Arc::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.exit.is_none()
    }
}

impl<A> Default for FnHooks<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for FnHooks<A> {
    fn clone(&self) -> Self {
        Self {
            enter: self.enter.clone(),
            exit: self.exit.clone(),
        }
    }
}

impl<A> fmt::Debug for FnHooks<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHooks")
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

impl<A> StateHooks<A> for FnHooks<A> {
    fn on_enter(&self, origin: Option<&Path>, args: &A) {
        if let Some(enter) = &self.enter {
            enter(origin, args);
        }
    }

    fn on_exit(&self, args: &A) -> Option<A> {
        self.exit.as_ref().and_then(|exit| exit(args))
    }
}
