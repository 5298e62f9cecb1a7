//! Recursive engine executing the equivalency plan
//!
//! The validator walks subject and expectation together, consulting its
//! step list for every pair until one step owns the comparison. Descent is
//! bounded at ten levels unless the options allow infinite recursion, and
//! expectation nodes already on the active branch are settled by reference
//! identity instead of descending again.

use std::sync::Arc;

use tantamount_core_types::PathSegment;

use crate::context::EquivalencyValidationContext;
use crate::errors::{EngineError, Result};
use crate::model::Comparands;
use crate::plan::{global_plan_snapshot, EquivalencyPlan};
use crate::steps::{EquivalencyStep, StepResult};

const MAX_DEPTH: usize = 10;

/// Recursion surface handed to every step
///
/// Steps that compare composites element by element descend through this
/// trait, so the engine keeps control of depth bounds, cycle tracking, and
/// path bookkeeping no matter which step triggers the recursion.
pub trait NestedValidator {
    /// Compare a nested pair at the context's current node
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoApplicableStep`] when the plan is exhausted
    /// for some pair. Mismatches are not errors; they accumulate on the
    /// context's scope.
    fn recursively_assert_equality(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
    ) -> Result<()>;

    /// Descend one path segment, compare the pair, and restore the node
    ///
    /// # Errors
    ///
    /// Propagates errors from [`NestedValidator::recursively_assert_equality`].
    fn recurse_into(
        &self,
        comparands: &Comparands,
        segment: PathSegment,
        context: &mut EquivalencyValidationContext,
    ) -> Result<()> {
        let parent = context.current_node().clone();
        context.set_current_node(parent.child(segment));
        let outcome = self.recursively_assert_equality(comparands, context);
        context.set_current_node(parent);
        outcome
    }
}

/// Drives one validation against a fixed snapshot of the plan
///
/// The step list is captured at construction, so plan mutations made while
/// a validation is running never affect it.
pub struct EquivalencyValidator {
    steps: Vec<Arc<dyn EquivalencyStep>>,
}

impl EquivalencyValidator {
    /// Validator running the process-wide plan as it exists right now
    pub fn new() -> Self {
        Self {
            steps: global_plan_snapshot(),
        }
    }

    /// Validator running a caller-provided plan
    pub fn with_plan(plan: &EquivalencyPlan) -> Self {
        Self {
            steps: plan.snapshot(),
        }
    }

    /// Compare a pair end to end
    ///
    /// Seeds the scope with the call's reportable configuration and reason,
    /// runs the recursive comparison, and attaches the trace when tracing
    /// was enabled. Mismatches land on the context's scope.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoApplicableStep`] when the plan is exhausted
    /// for some pair.
    pub fn assert_equality(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
    ) -> Result<()> {
        let configuration = context.options().to_string();
        let reason = context.take_reason();

        let scope = context.scope_mut();
        scope.assume_single_caller();
        scope.add_reportable("configuration", configuration);
        if let Some(reason) = reason.as_deref() {
            scope.because_of(reason);
        }

        tracing::debug!(
            subject = %comparands.subject(),
            expectation = %comparands.expectation(),
            "Starting equivalency validation"
        );

        self.recursively_assert_equality(comparands, context)?;

        if let Some(trace) = context.take_trace() {
            if !trace.is_empty() {
                context.scope_mut().add_reportable("trace", trace.render());
            }
        }

        tracing::debug!(
            failures = context.scope().failures().len(),
            "Finished equivalency validation"
        );

        Ok(())
    }

    fn try_steps(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
    ) -> Result<()> {
        for step in &self.steps {
            match step.handle(comparands, context, self)? {
                StepResult::ContinueWithNext => continue,
                StepResult::AssertionCompleted => {
                    if context.trace_enabled() {
                        let depth = context.current_node().depth();
                        let path = context.current_node().describe();
                        context.trace_line(depth, format!("{} owned {}", step.name(), path));
                    }
                    return Ok(());
                }
            }
        }

        tracing::debug!(
            path = %context.current_node().describe(),
            "Equivalency plan exhausted without a terminal step"
        );

        Err(EngineError::NoApplicableStep {
            subject: context.scope().render(comparands.subject()),
            expectation: context.scope().render(comparands.expectation()),
        })
    }

    fn assert_reference_identity(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
    ) {
        if context.trace_enabled() {
            let depth = context.current_node().depth();
            let path = context.current_node().describe();
            context.trace_line(depth, format!("Expectation at {} was seen before", path));
        }

        if !comparands.subject().ptr_eq(comparands.expectation()) {
            tracing::debug!(
                path = %context.current_node(),
                "Revisited expectation did not match by reference"
            );
            context
                .fail_with("Expected {context} to refer to {expectation}{because}, but found {subject}.");
        }
    }
}

impl NestedValidator for EquivalencyValidator {
    fn recursively_assert_equality(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
    ) -> Result<()> {
        let depth = context.current_node().depth();
        if !context.options().allow_infinite_recursion() && depth > MAX_DEPTH {
            tracing::debug!(depth, "Recursion depth bound reached");
            context.fail_with(&format!(
                "The maximum recursion depth of {} was reached.",
                MAX_DEPTH
            ));
            return Ok(());
        }

        let node = context.current_node().clone();
        let scope = context.scope_mut();
        scope.track_node(&node);
        scope.track_comparands(comparands);

        tracing::trace!(path = %node, depth, "Comparing pair");
        if context.trace_enabled() {
            context.trace_line(depth, format!("Visiting {}", node.describe()));
        }

        if context.is_cyclic_reference(comparands.expectation()) {
            self.assert_reference_identity(comparands, context);
            return Ok(());
        }

        let pushed = context.push_reference(comparands.expectation());
        let outcome = self.try_steps(comparands, context);
        context.pop_reference(pushed);
        outcome
    }
}

impl Default for EquivalencyValidator {
    fn default() -> Self {
        Self::new()
    }
}
