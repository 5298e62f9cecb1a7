//! Step short-circuiting aliased nodes

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::steps::{EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Completes immediately when both sides are the same graph node
#[derive(Debug, Default)]
pub struct ReferenceEqualityStep;

impl EquivalencyStep for ReferenceEqualityStep {
    fn name(&self) -> &'static str {
        "ReferenceEqualityStep"
    }

    fn handle(
        &self,
        comparands: &Comparands,
        _context: &mut EquivalencyValidationContext,
        _validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        if comparands.subject().ptr_eq(comparands.expectation()) {
            return Ok(StepResult::AssertionCompleted);
        }
        Ok(StepResult::ContinueWithNext)
    }
}
