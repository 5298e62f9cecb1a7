//! Custom equality comparers
//!
//! A comparer replaces the engine's own notion of equality for one type
//! token. Comparers are registered on the options and applied by the user
//! comparer step before any built-in strategy sees the pair.

use crate::model::Value;

/// Equality decision for one registered type
pub trait EqualityComparer: Send + Sync {
    /// Whether the two values are equal under this comparer
    fn eq(&self, subject: &Value, expectation: &Value) -> bool;

    /// Name used when a failure message cites this comparer
    fn describe(&self) -> String;
}

/// Comparer backed by a named closure
pub struct FnComparer<F>
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    name: String,
    decide: F,
}

impl<F> FnComparer<F>
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, decide: F) -> Self {
        Self {
            name: name.into(),
            decide,
        }
    }
}

impl<F> EqualityComparer for FnComparer<F>
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    fn eq(&self, subject: &Value, expectation: &Value) -> bool {
        (self.decide)(subject, expectation)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Float comparer with an absolute tolerance
///
/// Non-float values are never equal under this comparer.
#[derive(Debug, Clone, Copy)]
pub struct ApproxFloatComparer {
    tolerance: f64,
}

impl ApproxFloatComparer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl EqualityComparer for ApproxFloatComparer {
    fn eq(&self, subject: &Value, expectation: &Value) -> bool {
        match (subject.as_float(), expectation.as_float()) {
            (Some(left), Some(right)) => (left - right).abs() <= self.tolerance,
            _ => false,
        }
    }

    fn describe(&self) -> String {
        format!("a float comparer with tolerance {:?}", self.tolerance)
    }
}
