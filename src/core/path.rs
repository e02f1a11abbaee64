//! Colon-delimited addressing for triggers, targets and region trees.
//!
//! Every string that names something inside a statechart is parsed once into
//! a [`Path`] and routed as a token sequence from then on.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Segment separator used by trigger and target strings.
pub const SEPARATOR: char = ':';

/// Ordered sequence of name tokens.
///
/// Parsing follows plain string splitting on `:`, so a bare token becomes a
/// depth-1 path and `"regionA:running"` becomes `["regionA", "running"]`.
///
/// # Example
///
/// ```rust
/// use statechart::core::Path;
///
/// let path = Path::parse("player:playing");
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.head(), Some("player"));
/// assert_eq!(path.to_string(), "player:playing");
/// assert!(path.starts_with(&Path::parse("player")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path. Used to address the root machine itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a colon-delimited string into a path.
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: raw.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Build a path from already separated segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment, if any.
    pub fn head(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Everything after the first segment.
    pub fn tail(&self) -> &[String] {
        self.segments.get(1..).unwrap_or(&[])
    }

    /// True if `prefix` matches the leading segments of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// New path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// True if any segment is the empty string (`"a::b"`, `""`, `"a:"`).
    pub fn has_empty_segment(&self) -> bool {
        self.segments.iter().any(String::is_empty)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Path {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Path {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

impl From<&[String]> for Path {
    fn from(segments: &[String]) -> Self {
        Self {
            segments: segments.to_vec(),
        }
    }
}
