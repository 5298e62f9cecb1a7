use thiserror::Error;

/// Result type alias using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error taxonomy for the equivalence engine
///
/// Ordinary mismatches between a subject and an expectation are not errors;
/// they accumulate as failures on the `AssertionScope` so a single run can
/// report every difference. The variants here are defects in how the engine
/// was configured or invoked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Every step in the plan declined the pair, so nothing owned the comparison
    #[error("Do not know how to compare {subject} and {expectation}. The equivalency plan has no applicable step; it must end with a terminal step.")]
    NoApplicableStep {
        subject: String,
        expectation: String,
    },

    /// A plan mutation referenced a step name that is not in the plan
    #[error("Equivalency plan has no step named {name}")]
    StepNotFound { name: String },
}
