//! Terminal step comparing pairs as plain values

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::steps::{EquivalencyStep, StepResult};
use crate::validator::NestedValidator;

/// Fallback that never declines
///
/// Ends the default plan so every pair is owned by some step. The pair is
/// compared as one structural value; a mismatch is a single failure
/// rendering both sides.
#[derive(Debug, Default)]
pub struct SimpleEqualityStep;

impl SimpleEqualityStep {
    /// Plan name of the terminal step, used by `add` to stay in front of it
    pub const NAME: &'static str = "SimpleEqualityStep";
}

impl EquivalencyStep for SimpleEqualityStep {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        _validator: &dyn NestedValidator,
    ) -> Result<StepResult> {
        if !comparands
            .subject()
            .structurally_equal(comparands.expectation())
        {
            context.fail_with("Expected {context} to be {expectation}{because}, but found {subject}.");
        }
        Ok(StepResult::AssertionCompleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use crate::options::EquivalencyOptions;
    use crate::validator::EquivalencyValidator;
    use std::sync::Arc;

    fn run(subject: Value, expectation: Value) -> (StepResult, EquivalencyValidationContext) {
        let mut context = EquivalencyValidationContext::new(Arc::new(EquivalencyOptions::new()));
        let comparands = Comparands::rooted(subject, expectation);
        context.scope_mut().track_comparands(&comparands);
        let validator = EquivalencyValidator::new();

        let result = SimpleEqualityStep
            .handle(&comparands, &mut context, &validator)
            .unwrap();
        (result, context)
    }

    #[test]
    fn test_equal_values_pass() {
        let (result, context) = run(Value::int(2), Value::int(2));
        assert_eq!(result, StepResult::AssertionCompleted);
        assert!(!context.scope().has_failures());
    }

    #[test]
    fn test_mismatch_renders_both_sides() {
        let (result, context) = run(Value::int(1), Value::int(2));
        assert_eq!(result, StepResult::AssertionCompleted);
        assert_eq!(
            context.scope().failures()[0].message,
            "Expected root to be 2, but found 1."
        );
    }

    #[test]
    fn test_never_declines_even_for_mixed_kinds() {
        let (result, context) = run(Value::text("1"), Value::int(1));
        assert_eq!(result, StepResult::AssertionCompleted);
        assert!(context.scope().has_failures());
    }
}
