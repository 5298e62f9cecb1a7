//! Step comparing maps entry-wise

use std::collections::BTreeMap;

use tantamount_core_types::{PathSegment, TypeToken};

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::options::EqualityStrategy;
use crate::steps::{EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Compares maps by key
///
/// Activates when the expected type is a map compared by members. Every
/// expected key must exist in the subject and no subject key may be
/// unexpected; values of common keys recurse with a key segment appended
/// to the path.
#[derive(Debug, Default)]
pub struct MapEquivalencyStep;

impl EquivalencyStep for MapEquivalencyStep {
    fn name(&self) -> &'static str {
        "MapEquivalencyStep"
    }

    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        let expected_type = comparands.expected_type(context.options());
        if expected_type != TypeToken::Map {
            return Ok(StepResult::ContinueWithNext);
        }
        if context.options().equality_strategy(&expected_type) != EqualityStrategy::ByMembers {
            return Ok(StepResult::ContinueWithNext);
        }
        let Some(expected_entries) = comparands.expectation().entries() else {
            return Ok(StepResult::ContinueWithNext);
        };

        let Some(subject_entries) = comparands.subject().entries() else {
            context.fail_with("Expected {context} to be a map{because}, but found {subject}.");
            return Ok(StepResult::AssertionCompleted);
        };

        let subject_lookup: BTreeMap<_, _> = subject_entries.into_iter().collect();

        for (key, expected_value) in &expected_entries {
            match subject_lookup.get(key) {
                Some(subject_value) => {
                    let nested = Comparands::new(
                        subject_value.clone(),
                        expected_value.clone(),
                        expected_value.type_token(),
                    );
                    validator.recurse_into(&nested, PathSegment::key(key.clone()), context)?;
                }
                None => {
                    context.fail_with(&format!(
                        "Expected {{context}} to contain key {:?}{{because}}, but it was missing.",
                        key
                    ));
                }
            }
        }

        for key in subject_lookup.keys() {
            if !expected_entries.iter().any(|(expected, _)| expected == key) {
                context.fail_with(&format!(
                    "Did not expect {{context}} to contain key {:?}{{because}}.",
                    key
                ));
            }
        }

        Ok(StepResult::AssertionCompleted)
    }
}
