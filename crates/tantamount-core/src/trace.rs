//! Traversal trace for diagnosing equivalency outcomes
//!
//! Tracing is opt-in per validation. When enabled, the validator writes one
//! line per compared pair plus one per completing step, indented by node
//! depth, and attaches the rendering to the scope when the call finishes.

/// Indented record of the steps taken during one validation
#[derive(Debug, Default)]
pub struct TraceBuffer {
    lines: Vec<(usize, String)>,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the given nesting depth
    pub fn write_line(&mut self, depth: usize, text: impl Into<String>) {
        self.lines.push((depth, text.into()));
    }

    /// Whether anything has been traced
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the trace with two spaces of indent per depth level
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (depth, text) in &self.lines {
            for _ in 0..*depth {
                out.push_str("  ");
            }
            out.push_str(text);
            out.push('\n');
        }
        out
    }
}
