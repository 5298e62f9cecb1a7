//! Step deciding pairs with an absent side

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::steps::{EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Owns every pair where at least one side is absent
///
/// Both absent is equivalence; exactly one absent is a failure naming what
/// was expected and what was found. Pairs with both sides present are
/// declined.
#[derive(Debug, Default)]
pub struct UnitEquivalencyStep;

impl EquivalencyStep for UnitEquivalencyStep {
    fn name(&self) -> &'static str {
        "UnitEquivalencyStep"
    }

    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        _validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        let subject_absent = comparands.subject().is_unit();
        let expectation_absent = comparands.expectation().is_unit();

        if !subject_absent && !expectation_absent {
            return Ok(StepResult::ContinueWithNext);
        }

        if expectation_absent && !subject_absent {
            context.fail_with("Expected {context} to be <unit>{because}, but found {subject}.");
        } else if subject_absent && !expectation_absent {
            context.fail_with("Expected {context} to be {expectation}{because}, but found <unit>.");
        }

        Ok(StepResult::AssertionCompleted)
    }
}
