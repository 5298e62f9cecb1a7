//! Comparison strategies consulted for every pair
//!
//! Each step is one strategy in the equivalency plan. For a given pair a
//! step either declines, letting the next step in plan order try, or owns
//! the comparison outright, recording any mismatches on the scope. Order is
//! the only dispatch mechanism, so the plan must end with a step that never
//! declines.

pub mod comparer_binding;
pub mod map;
pub mod record;
pub mod reference_equality;
pub mod seq;
pub mod simple_equality;
pub mod unit_handling;
pub mod user_comparers;

use tantamount_core_types::TypeToken;

use crate::context::EquivalencyValidationContext;
use crate::errors::Result;
use crate::model::Comparands;
use crate::options::EqualityComparer;
use crate::validator::NestedValidator;

pub use comparer_binding::ComparerBindingStep;
pub use map::MapEquivalencyStep;
pub use record::RecordEquivalencyStep;
pub use reference_equality::ReferenceEqualityStep;
pub use seq::SeqEquivalencyStep;
pub use simple_equality::SimpleEqualityStep;
pub use unit_handling::UnitEquivalencyStep;
pub use user_comparers::UserComparerStep;

/// Outcome of one step's attempt at a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The step does not apply; the next step in the plan gets the pair
    ContinueWithNext,
    /// The step owned the comparison; no further steps run for this pair
    AssertionCompleted,
}

/// One strategy in the equivalency plan
pub trait EquivalencyStep: Send + Sync {
    /// Stable name used for plan anchoring and tracing
    fn name(&self) -> &'static str;

    /// Attempt to handle the pair
    ///
    /// Mismatches are recorded on the context's scope; the `Err` channel is
    /// reserved for defects such as an exhausted plan inside a nested
    /// validation.
    fn handle(
        &self,
        comparands: &Comparands,
        context: &mut EquivalencyValidationContext,
        validator: &dyn NestedValidator,
    ) -> Result<StepResult>;
}

/// Assert a pair with a comparer bound to one type token
///
/// Shared by the user comparer step and the plan-registered binding step:
/// the subject must actually have the target type, then the comparer
/// decides equality. Both failures cite the comparer's own description.
pub(crate) fn assert_comparer_equality(
    comparer: &dyn EqualityComparer,
    expected_type: &TypeToken,
    comparands: &Comparands,
    context: &mut EquivalencyValidationContext,
) {
    let found_type = comparands.subject().type_token();
    if found_type != *expected_type {
        context.fail_with(&format!(
            "Expected {{context}} to be of type {}{{because}}, but found {}.",
            expected_type, found_type
        ));
        return;
    }

    if !comparer.eq(comparands.subject(), comparands.expectation()) {
        context.fail_with(&format!(
            "Expected {{context}} to be equal to {{expectation}} according to {}{{because}}, but {{subject}} was not.",
            comparer.describe()
        ));
    }
}
