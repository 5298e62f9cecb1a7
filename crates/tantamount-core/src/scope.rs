//! Failure collection for one validation call
//!
//! Recoverable mismatches never abort a validation; they accumulate on an
//! `AssertionScope` so a single run reports every difference it found. The
//! scope is owned by the validation context and threaded by parameter, so
//! concurrent validations never share reporting state.
//!
//! Failure messages are templates. The scope expands `{context}` to the
//! tracked path, `{because}` to the caller's reason, and `{subject}` /
//! `{expectation}` to renderings of the tracked comparands, produced only
//! when a failure actually needs them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::format::{DefaultFormatter, ValueFormatter};
use crate::model::{Comparands, Node, Value};

/// One recorded equivalency failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Path of the node the failure was raised at
    pub path: String,
    /// Fully expanded failure message
    pub message: String,
}

/// Serializable summary of a finished validation
#[derive(Debug, Clone, Serialize)]
pub struct EquivalencyReport {
    pub failures: Vec<Failure>,
    pub reportables: Vec<(String, String)>,
}

/// Collects recoverable failures raised during one validation call
pub struct AssertionScope {
    failures: Vec<Failure>,
    because: Option<String>,
    current_node: Option<Node>,
    current: Option<Comparands>,
    reportables: Vec<(String, String)>,
    single_caller: bool,
    formatter: Arc<dyn ValueFormatter>,
}

impl AssertionScope {
    /// Scope rendering values through the default formatter
    pub fn new() -> Self {
        Self::with_formatter(Arc::new(DefaultFormatter))
    }

    /// Scope rendering values through a caller-provided formatter
    pub fn with_formatter(formatter: Arc<dyn ValueFormatter>) -> Self {
        Self {
            failures: Vec::new(),
            because: None,
            current_node: None,
            current: None,
            reportables: Vec::new(),
            single_caller: false,
            formatter,
        }
    }

    /// Mark that one logical assertion owns this scope
    pub fn assume_single_caller(&mut self) {
        self.single_caller = true;
    }

    /// Whether the scope has been claimed by a single logical assertion
    pub fn is_single_caller(&self) -> bool {
        self.single_caller
    }

    /// Set the reason substituted for `{because}`
    ///
    /// The reason is normalized to read as a clause: a leading "because"
    /// is kept, anything else gets one prepended, and an empty reason
    /// expands to nothing.
    pub fn because_of(&mut self, reason: &str) {
        let trimmed = reason.trim();
        self.because = if trimmed.is_empty() {
            None
        } else if trimmed.to_lowercase().starts_with("because") {
            Some(format!(" {}", trimmed))
        } else {
            Some(format!(" because {}", trimmed))
        };
    }

    /// Attach a named piece of context to the final report
    pub fn add_reportable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.reportables.push((key.into(), value.into()));
    }

    /// Reportables attached so far
    pub fn reportables(&self) -> &[(String, String)] {
        &self.reportables
    }

    /// Record the node future failures should be attributed to
    pub fn track_node(&mut self, node: &Node) {
        self.current_node = Some(node.clone());
    }

    /// Record the pair future failures may render
    pub fn track_comparands(&mut self, comparands: &Comparands) {
        self.current = Some(comparands.clone());
    }

    /// Render a value through the scope's formatter
    pub fn render(&self, value: &Value) -> String {
        self.formatter.render(value)
    }

    /// Record a failure at the tracked node, expanding the template
    pub fn fail_with(&mut self, template: &str) {
        let path = self
            .current_node
            .as_ref()
            .map(Node::describe)
            .unwrap_or_else(|| "root".to_string());
        let message = self.expand(template, &path);
        self.failures.push(Failure { path, message });
    }

    /// Failures recorded so far
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Whether any failure has been recorded
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Snapshot of the scope as a serializable report
    pub fn report(&self) -> EquivalencyReport {
        EquivalencyReport {
            failures: self.failures.clone(),
            reportables: self.reportables.clone(),
        }
    }

    fn expand(&self, template: &str, path: &str) -> String {
        let mut message = String::with_capacity(template.len() + 16);
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let tail = &rest[open..];
            match tail.find('}') {
                Some(close) => {
                    match &tail[1..close] {
                        "context" => message.push_str(path),
                        "because" => message.push_str(self.because.as_deref().unwrap_or("")),
                        "subject" => match &self.current {
                            Some(comparands) => {
                                message.push_str(&self.formatter.render(comparands.subject()));
                            }
                            None => message.push_str("<unit>"),
                        },
                        "expectation" => match &self.current {
                            Some(comparands) => {
                                message.push_str(&self.formatter.render(comparands.expectation()));
                            }
                            None => message.push_str("<unit>"),
                        },
                        // Unknown tokens stay literal
                        _ => message.push_str(&tail[..=close]),
                    }
                    rest = &tail[close + 1..];
                }
                None => {
                    message.push_str(tail);
                    rest = "";
                }
            }
        }
        message.push_str(rest);
        message
    }
}

impl Default for AssertionScope {
    fn default() -> Self {
        Self::new()
    }
}
