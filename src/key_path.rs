use std::fmt;
use std::str::FromStr;

use crate::errors::ConfTreeError;

/// Dotted chain of mapping keys, e.g. `settings.login`.
///
/// Always holds at least one segment and never an empty one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(raw: &str) -> Result<Self, ConfTreeError> {
        if raw.trim().is_empty() {
            return Err(ConfTreeError::InvalidPath("path cannot be empty".into()));
        }
        Self::from_segments(raw.split('.'))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, ConfTreeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ConfTreeError::InvalidPath("path cannot be empty".into()));
        }
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ConfTreeError::InvalidPath(format!(
                "`{}` contains an empty segment",
                segments.join(".")
            )));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Segment naming the collection that receives the mutation.
    pub fn terminal(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn segment(&self, depth: usize) -> Option<&str> {
        self.segments.get(depth).map(String::as_str)
    }

    /// True when `key` at `depth` is exactly where the path ends.
    pub fn is_target(&self, depth: usize, key: &str) -> bool {
        depth + 1 == self.segments.len() && self.segment(depth) == Some(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.segments.iter().any(|segment| segment == key)
    }

    pub fn is_terminal(&self, key: &str) -> bool {
        self.terminal() == key
    }
}

impl FromStr for KeyPath {
    type Err = ConfTreeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
