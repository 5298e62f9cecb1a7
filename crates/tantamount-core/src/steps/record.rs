//! Step comparing records member-wise

use tantamount_core_types::{PathSegment, TypeToken};

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::options::EqualityStrategy;
use crate::steps::{EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Compares records by the expectation's members
///
/// Activates when the expected type is a record compared by members. The
/// expectation's fields drive the comparison: each must exist on the
/// subject and recurses with a member segment appended to the path, while
/// extra subject fields are ignored. Record type names do not have to
/// match; equivalence is structural.
#[derive(Debug, Default)]
pub struct RecordEquivalencyStep;

impl EquivalencyStep for RecordEquivalencyStep {
    fn name(&self) -> &'static str {
        "RecordEquivalencyStep"
    }

    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        let expected_type = comparands.expected_type(context.options());
        if !matches!(expected_type, TypeToken::Record(_)) {
            return Ok(StepResult::ContinueWithNext);
        }
        if context.options().equality_strategy(&expected_type) != EqualityStrategy::ByMembers {
            return Ok(StepResult::ContinueWithNext);
        }
        let Some(expected_fields) = comparands.expectation().fields() else {
            return Ok(StepResult::ContinueWithNext);
        };

        if comparands.subject().fields().is_none() {
            context.fail_with(&format!(
                "Expected {{context}} to be a record of type {}{{because}}, but found {{subject}}.",
                expected_type
            ));
            return Ok(StepResult::AssertionCompleted);
        }

        for (name, expected_value) in &expected_fields {
            match comparands.subject().field(name) {
                Some(subject_value) => {
                    let nested = Comparands::new(
                        subject_value,
                        expected_value.clone(),
                        expected_value.type_token(),
                    );
                    validator.recurse_into(&nested, PathSegment::member(name.clone()), context)?;
                }
                None => {
                    context.fail_with(&format!(
                        "Expected {{context}} to have a member {}{{because}}, but it was missing.",
                        name
                    ));
                }
            }
        }

        Ok(StepResult::AssertionCompleted)
    }
}
