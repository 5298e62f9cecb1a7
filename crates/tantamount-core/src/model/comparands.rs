//! The pair of values under comparison
//!
//! A `Comparands` carries the subject (what was produced), the expectation
//! (what it should be equivalent to), and the type the current position was
//! declared as. Which of the declared or runtime type drives step dispatch
//! is decided per call by the options.

use tantamount_core_types::TypeToken;

use crate::model::value::Value;
use crate::options::EquivalencyOptions;

/// Subject and expectation at one position of the traversal
#[derive(Debug, Clone)]
pub struct Comparands {
    subject: Value,
    expectation: Value,
    declared_type: TypeToken,
}

impl Comparands {
    /// Pair with an explicitly declared type
    pub fn new(subject: Value, expectation: Value, declared_type: TypeToken) -> Self {
        Self {
            subject,
            expectation,
            declared_type,
        }
    }

    /// Pair for two root values, declared as the expectation's runtime type
    pub fn rooted(subject: Value, expectation: Value) -> Self {
        let declared_type = expectation.type_token();
        Self::new(subject, expectation, declared_type)
    }

    /// The value produced by the code under test
    pub fn subject(&self) -> &Value {
        &self.subject
    }

    /// The value the subject should be equivalent to
    pub fn expectation(&self) -> &Value {
        &self.expectation
    }

    /// The type this position was declared as
    pub fn declared_type(&self) -> &TypeToken {
        &self.declared_type
    }

    /// The expectation's actual type, falling back to the declared type
    /// when the expectation is absent
    pub fn runtime_type(&self) -> TypeToken {
        if self.expectation.is_unit() {
            self.declared_type.clone()
        } else {
            self.expectation.type_token()
        }
    }

    /// The type steps should dispatch on under the given options
    pub fn expected_type(&self, options: &EquivalencyOptions) -> TypeToken {
        if options.use_runtime_typing() {
            self.runtime_type()
        } else {
            self.declared_type.clone()
        }
    }
}

/// Identity comparison of both sides; never structural
impl PartialEq for Comparands {
    fn eq(&self, other: &Self) -> bool {
        self.subject.ptr_eq(&other.subject) && self.expectation.ptr_eq(&other.expectation)
    }
}
