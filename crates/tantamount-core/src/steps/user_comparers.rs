//! Step applying comparers registered on the options

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::steps::{assert_comparer_equality, EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Applies per-call custom comparers before any built-in strategy
///
/// Activates only when the expected type exactly matches a registered
/// comparer's token. Pairs with an absent side are declined so the unit
/// handling step decides them.
#[derive(Debug, Default)]
pub struct UserComparerStep;

impl EquivalencyStep for UserComparerStep {
    fn name(&self) -> &'static str {
        "UserComparerStep"
    }

    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        _validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        let expected_type = comparands.expected_type(context.options());
        let Some(comparer) = context.options().custom_comparer(&expected_type) else {
            return Ok(StepResult::ContinueWithNext);
        };

        if comparands.subject().is_unit() || comparands.expectation().is_unit() {
            return Ok(StepResult::ContinueWithNext);
        }

        assert_comparer_equality(comparer.as_ref(), &expected_type, comparands, context);
        Ok(StepResult::AssertionCompleted)
    }
}
