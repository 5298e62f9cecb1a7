//! Path segments for locations inside a compared graph
//!
//! A path is a sequence of segments from the root of the comparison down
//! to a nested value. Segments render in the suffix form used by failure
//! messages, so a full path concatenates as `root.Items[2].Name`.

use serde::{Deserialize, Serialize};

/// One step of a path from the root of a compared graph to a nested value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Named member of a record
    Member(String),
    /// Position in a sequence
    Index(usize),
    /// Entry of a map
    Key(String),
}

impl PathSegment {
    /// Segment for a record member
    pub fn member(name: impl Into<String>) -> Self {
        Self::Member(name.into())
    }

    /// Segment for a map entry
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member(name) => write!(f, ".{}", name),
            Self::Index(index) => write!(f, "[{}]", index),
            Self::Key(key) => write!(f, "[{:?}]", key),
        }
    }
}
