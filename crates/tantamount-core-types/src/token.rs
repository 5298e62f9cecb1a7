//! Engine-level type identity
//!
//! The engine dispatches on the kind of a value rather than on Rust types:
//! each scalar kind, sequences, maps, and named records get a token, and
//! records carry their type name. Tokens are the keys for equality-strategy
//! overrides and custom comparer registration.

use serde::{Deserialize, Serialize};

/// Identity of a value's type as seen by the equivalence engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeToken {
    /// The absent value
    Unit,
    /// Boolean scalar
    Bool,
    /// Signed integer scalar
    Int,
    /// Floating-point scalar
    Float,
    /// Text scalar
    Text,
    /// Ordered sequence of values
    Seq,
    /// String-keyed map of values
    Map,
    /// Named record with ordered fields
    Record(String),
}

impl TypeToken {
    /// Token for a named record type
    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(name.into())
    }

    /// Whether values of this type carry members or elements to recurse into
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Seq | Self::Map | Self::Record(_))
    }
}

impl std::fmt::Display for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
            Self::Seq => write!(f, "seq"),
            Self::Map => write!(f, "map"),
            Self::Record(name) => write!(f, "{}", name),
        }
    }
}
