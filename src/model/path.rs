//! Command paths
//!
//! A command path is the ordered sequence of segments a user types to
//! address a command, e.g. `["aws", "s3", "sync"]`. It is the primary key
//! for resolution and collision detection. Paths display as their segments
//! joined by single spaces, which is also the form exported to child
//! processes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("empty command path")]
    Empty,
}

/// An ordered sequence of path segments addressing a command node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandPath {
    segments: Vec<String>,
}

impl CommandPath {
    /// The empty path, used as the scan prefix at a root
    pub fn empty() -> Self {
        Self { segments: Vec::new() }
    }

    /// Builds a path from an iterator of segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with `segment` appended
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Returns the sibling path with the final segment replaced by `segment`
    ///
    /// Returns `None` for the empty path. Aliases are expanded with this:
    /// they live in the same parent namespace as the command declaring them.
    pub fn sibling(&self, segment: &str) -> Option<Self> {
        let (_, parent) = self.segments.split_last()?;
        let mut segments = parent.to_vec();
        segments.push(segment.to_string());
        Some(Self { segments })
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

    /// Returns the final segment, if any
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(" "))
    }
}

impl FromStr for CommandPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s.split_whitespace().map(String::from).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }
}

impl TryFrom<String> for CommandPath {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CommandPath> for String {
    fn from(path: CommandPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_joins_with_spaces() {
        let path = CommandPath::from_segments(["aws", "s3", "sync"]);
        assert_eq!(path.to_string(), "aws s3 sync");
    }

    #[test]
    fn parse_splits_on_whitespace() {
        let path: CommandPath = "gen  uuid".parse().unwrap();
        assert_eq!(path.segments(), ["gen", "uuid"]);
    }

    #[test]
    fn parse_empty_fails() {
        assert_eq!("".parse::<CommandPath>(), Err(PathError::Empty));
        assert_eq!("   ".parse::<CommandPath>(), Err(PathError::Empty));
    }

    #[test]
    fn child_appends() {
        let path = CommandPath::empty().child("npm").child("run");
        assert_eq!(path.segments(), ["npm", "run"]);
    }

    #[test]
    fn sibling_replaces_last_segment() {
        let path = CommandPath::from_segments(["npm", "show-scripts"]);
        let alias = path.sibling("ss").unwrap();
        assert_eq!(alias.segments(), ["npm", "ss"]);
    }

    #[test]
    fn sibling_of_empty_is_none() {
        assert!(CommandPath::empty().sibling("x").is_none());
    }

    #[test]
    fn equality_is_segment_wise() {
        let a = CommandPath::from_segments(["gen", "uuid"]);
        let b: CommandPath = "gen uuid".parse().unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn display_parse_round_trip(segments in proptest::collection::vec("[a-z0-9_-]{1,12}", 1..6)) {
            let path = CommandPath::from_segments(segments);
            let parsed: CommandPath = path.to_string().parse().unwrap();
            prop_assert_eq!(parsed, path);
        }
    }
}
