//! Location of the pair currently being compared
//!
//! A node is the engine's cursor into the compared graphs. Nodes are
//! immutable: descending into a member yields a child node one segment
//! deeper and leaves the parent untouched, so every branch of the traversal
//! owns its own location.

use tantamount_core_types::PathSegment;

/// A location inside the compared graphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    segments: Vec<PathSegment>,
}

impl Node {
    /// The root location with no segments
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Number of segments between this node and the root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The segments from the root down to this node
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// A node one segment deeper
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Render the path from the root, e.g. `root.Items[2].Name`
    ///
    /// Built on demand: branches that never fail never pay for it.
    pub fn describe(&self) -> String {
        let mut description = String::from("root");
        for segment in &self.segments {
            description.push_str(&segment.to_string());
        }
        description
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
