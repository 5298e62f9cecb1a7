//! Step binding one comparer to one type token

use std::sync::Arc;

use tantamount_core_types::TypeToken;

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::options::EqualityComparer;
use crate::steps::{assert_comparer_equality, EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Applies one comparer to every pair whose expected type matches exactly
///
/// Unlike the user comparer step this carries its own registration, so it
/// can be placed anywhere in the plan and applies regardless of per-call
/// options. No subtype activation: the expected type must equal the bound
/// token. Pairs with an absent side are declined so the unit handling step
/// decides them.
pub struct ComparerBindingStep {
    target: TypeToken,
    comparer: Arc<dyn EqualityComparer>,
}

impl ComparerBindingStep {
    pub fn new(target: TypeToken, comparer: Arc<dyn EqualityComparer>) -> Self {
        Self { target, comparer }
    }
}

impl EquivalencyStep for ComparerBindingStep {
    fn name(&self) -> &'static str {
        "ComparerBindingStep"
    }

    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        _validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        if comparands.expected_type(context.options()) != self.target {
            return Ok(StepResult::ContinueWithNext);
        }

        if comparands.subject().is_unit() || comparands.expectation().is_unit() {
            return Ok(StepResult::ContinueWithNext);
        }

        assert_comparer_equality(self.comparer.as_ref(), &self.target, comparands, context);
        Ok(StepResult::AssertionCompleted)
    }
}
