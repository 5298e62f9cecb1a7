//! Mutable state carried through one validation call
//!
//! The context owns everything a single top-level validation mutates: the
//! current node, the failure scope, the cycle tracker, and the optional
//! trace. The options it carries are shared and read-only.

use std::sync::Arc;

use tantamount_core_types::ObjectIdentity;

use crate::model::{Node, Value};
use crate::options::EquivalencyOptions;
use crate::scope::AssertionScope;
use crate::trace::TraceBuffer;

/// Expectation nodes on the active descent path
///
/// A node counts as seen only while it is an ancestor of the current pair:
/// push on descent, pop on return. Siblings may therefore share expectation
/// nodes freely without looking like cycles.
#[derive(Debug, Default)]
pub struct CycleTracker {
    active: Vec<ObjectIdentity>,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the identity is an ancestor of the current pair
    pub fn is_active(&self, identity: ObjectIdentity) -> bool {
        self.active.contains(&identity)
    }

    /// Mark an identity as an ancestor of everything below it
    pub fn push(&mut self, identity: ObjectIdentity) {
        self.active.push(identity);
    }

    /// Unmark the most recently pushed identity
    pub fn pop(&mut self) {
        self.active.pop();
    }
}

/// Per-call mutable state threaded through the validator and the steps
pub struct EquivalencyValidationContext {
    options: Arc<EquivalencyOptions>,
    node: Node,
    scope: AssertionScope,
    cycles: CycleTracker,
    trace: Option<TraceBuffer>,
    reason: Option<String>,
}

impl EquivalencyValidationContext {
    /// Context at the root node with an empty scope
    pub fn new(options: Arc<EquivalencyOptions>) -> Self {
        Self {
            options,
            node: Node::root(),
            scope: AssertionScope::new(),
            cycles: CycleTracker::new(),
            trace: None,
            reason: None,
        }
    }

    /// Use a caller-provided scope instead of a fresh one
    pub fn with_scope(mut self, scope: AssertionScope) -> Self {
        self.scope = scope;
        self
    }

    /// Record the reason reported with every failure
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Enable traversal tracing for this call
    pub fn with_tracing(mut self) -> Self {
        self.trace = Some(TraceBuffer::new());
        self
    }

    /// The options this validation runs under
    pub fn options(&self) -> &EquivalencyOptions {
        &self.options
    }

    /// Where the traversal currently is
    pub fn current_node(&self) -> &Node {
        &self.node
    }

    /// Move the traversal cursor
    pub fn set_current_node(&mut self, node: Node) {
        self.node = node;
    }

    /// The failure scope of this call
    pub fn scope(&self) -> &AssertionScope {
        &self.scope
    }

    /// Mutable access to the failure scope
    pub fn scope_mut(&mut self) -> &mut AssertionScope {
        &mut self.scope
    }

    /// Record a failure attributed to the current node
    ///
    /// Re-tracks the node first, so failures raised after a nested
    /// recursion returned still point at the right path.
    pub fn fail_with(&mut self, template: &str) {
        let node = self.node.clone();
        self.scope.track_node(&node);
        self.scope.fail_with(template);
    }

    /// Whether the expectation is already an ancestor of the current pair
    pub fn is_cyclic_reference(&self, expectation: &Value) -> bool {
        expectation.type_token().is_composite() && self.cycles.is_active(expectation.identity())
    }

    /// Track a composite expectation for the duration of its branch,
    /// returning whether anything was pushed
    pub(crate) fn push_reference(&mut self, expectation: &Value) -> bool {
        if expectation.type_token().is_composite() {
            self.cycles.push(expectation.identity());
            true
        } else {
            false
        }
    }

    /// Undo a matching `push_reference`
    pub(crate) fn pop_reference(&mut self, pushed: bool) {
        if pushed {
            self.cycles.pop();
        }
    }

    /// Whether tracing is enabled for this call
    pub fn trace_enabled(&self) -> bool {
        self.trace.is_some()
    }

    /// Append a trace line when tracing is enabled
    pub fn trace_line(&mut self, depth: usize, text: impl Into<String>) {
        if let Some(trace) = self.trace.as_mut() {
            trace.write_line(depth, text);
        }
    }

    /// Detach the trace so it can be rendered into the scope
    pub(crate) fn take_trace(&mut self) -> Option<TraceBuffer> {
        self.trace.take()
    }

    /// Detach the reason recorded for this call
    pub(crate) fn take_reason(&mut self) -> Option<String> {
        self.reason.take()
    }
}
