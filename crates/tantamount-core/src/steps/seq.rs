//! Step comparing sequences element-wise

use tantamount_core_types::{PathSegment, TypeToken};

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::options::EqualityStrategy;
use crate::steps::{EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Compares sequences in strict, index-aligned order
///
/// Activates when the expected type is a sequence compared by members.
/// Lengths must match exactly; matching positions recurse with an index
/// segment appended to the path.
#[derive(Debug, Default)]
pub struct SeqEquivalencyStep;

impl EquivalencyStep for SeqEquivalencyStep {
    fn name(&self) -> &'static str {
        "SeqEquivalencyStep"
    }

    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        let expected_type = comparands.expected_type(context.options());
        if expected_type != TypeToken::Seq {
            return Ok(StepResult::ContinueWithNext);
        }
        if context.options().equality_strategy(&expected_type) != EqualityStrategy::ByMembers {
            return Ok(StepResult::ContinueWithNext);
        }
        let Some(expected_items) = comparands.expectation().elements() else {
            return Ok(StepResult::ContinueWithNext);
        };

        let Some(subject_items) = comparands.subject().elements() else {
            context.fail_with("Expected {context} to be a sequence{because}, but found {subject}.");
            return Ok(StepResult::AssertionCompleted);
        };

        if subject_items.len() != expected_items.len() {
            context.fail_with(&format!(
                "Expected {{context}} to contain {} item(s){{because}}, but found {}.",
                expected_items.len(),
                subject_items.len()
            ));
            return Ok(StepResult::AssertionCompleted);
        }

        for (index, (subject_item, expected_item)) in
            subject_items.iter().zip(expected_items.iter()).enumerate()
        {
            let nested = Comparands::new(
                subject_item.clone(),
                expected_item.clone(),
                expected_item.type_token(),
            );
            validator.recurse_into(&nested, PathSegment::Index(index), context)?;
        }

        Ok(StepResult::AssertionCompleted)
    }
}
