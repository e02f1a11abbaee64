//! Guarded, actioned transitions and their targets.

use crate::core::{Guard, Path};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Side-effecting callback run when a transition fires.
pub type Action<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Computes targets from the trigger arguments at execution time.
pub type TargetResolver<A> = Arc<dyn Fn(&A) -> Targets + Send + Sync>;

/// A normalized collection of target paths.
///
/// Single strings and single paths become one-element collections; every
/// string is colon-split.
///
/// ```rust
/// use statechart::engine::Targets;
///
/// let one = Targets::from("player:playing");
/// assert_eq!(one.len(), 1);
///
/// let fan_out = Targets::from(vec!["left:on", "right:on"]);
/// assert_eq!(fan_out.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Targets(Vec<Path>);

impl Targets {
    /// No targets: the transition runs its action without changing state.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn paths(&self) -> &[Path] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.0
    }
}

impl From<&str> for Targets {
    fn from(target: &str) -> Self {
        Self(vec![Path::parse(target)])
    }
}

impl From<String> for Targets {
    fn from(target: String) -> Self {
        Self(vec![Path::parse(&target)])
    }
}

impl From<Path> for Targets {
    fn from(target: Path) -> Self {
        Self(vec![target])
    }
}

impl From<Vec<Path>> for Targets {
    fn from(targets: Vec<Path>) -> Self {
        Self(targets)
    }
}

impl From<Vec<&str>> for Targets {
    fn from(targets: Vec<&str>) -> Self {
        Self(targets.into_iter().map(Path::parse).collect())
    }
}

impl From<Vec<String>> for Targets {
    fn from(targets: Vec<String>) -> Self {
        Self(targets.iter().map(|t| Path::parse(t)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(targets: [&str; N]) -> Self {
        Self(targets.into_iter().map(Path::parse).collect())
    }
}

impl<T: Into<Targets>> From<Option<T>> for Targets {
    fn from(target: Option<T>) -> Self {
        target.map(Into::into).unwrap_or_default()
    }
}

/// Where a transition leads.
pub enum Target<A> {
    /// Internal transition: action only.
    None,
    /// One or more literal paths fixed at construction.
    Static(Targets),
    /// Paths computed from the trigger arguments.
    Dynamic(TargetResolver<A>),
}

impl<A> Target<A> {
    fn resolve(&self, args: &A) -> Targets {
        match self {
            Target::None => Targets::none(),
            Target::Static(targets) => targets.clone(),
            Target::Dynamic(resolver) => resolver(args),
        }
    }
}

impl<A> Clone for Target<A> {
    fn clone(&self) -> Self {
        match self {
            Target::None => Target::None,
            Target::Static(targets) => Target::Static(targets.clone()),
            Target::Dynamic(resolver) => Target::Dynamic(Arc::clone(resolver)),
        }
    }
}

impl<A> fmt::Debug for Target<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::None => f.write_str("None"),
            Target::Static(targets) => f.debug_tuple("Static").field(targets).finish(),
            Target::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// An edge bound to one trigger token, owned by the state that declares it.
///
/// Built through [`TransitionBuilder`](crate::builder::TransitionBuilder).
pub struct Transition<A> {
    pub(crate) trigger: String,
    pub(crate) guard: Option<Guard<A>>,
    pub(crate) action: Option<Action<A>>,
    pub(crate) target: Target<A>,
}

impl<A> Transition<A> {
    /// The trigger token this transition answers to.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn target(&self) -> &Target<A> {
        &self.target
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// True if this transition answers to `token`.
    pub fn matches(&self, token: &str) -> bool {
        self.trigger == token
    }

    /// Check the guard for these arguments (pure).
    pub fn can_execute(&self, args: &A) -> bool {
        let allowed = self.guard.as_ref().is_none_or(|g| g.check(args));
        trace!(trigger = %self.trigger, allowed, "evaluated guard");
        allowed
    }

    /// Run the action and resolve the targets.
    ///
    /// A failing guard yields no targets and skips the action.
    pub fn execute(&self, args: &A) -> Vec<Path> {
        if !self.can_execute(args) {
            return Vec::new();
        }

        if let Some(action) = &self.action {
            action(args);
        }
        self.target.resolve(args).into_paths()
    }
}

impl<A> Clone for Transition<A> {
    fn clone(&self) -> Self {
        Self {
            trigger: self.trigger.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
            target: self.target.clone(),
        }
    }
}

impl<A> fmt::Debug for Transition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("trigger", &self.trigger)
            .field("guarded", &self.guard.is_some())
            .field("target", &self.target)
            .finish()
    }
}
