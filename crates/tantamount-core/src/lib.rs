//! Tantamount Core - Structural equivalence engine
//!
//! This crate provides the comparison machinery for deciding whether two
//! object graphs are structurally equivalent, including:
//! - A shared, cycle-capable value model for subjects and expectations
//! - An ordered, mutable plan of comparison steps with a terminal fallback
//! - Per-call options for typing, recursion, strategies, and comparers
//! - A recursive validator with depth bounds and cycle detection
//! - Failure collection with path attribution and message templating
//!
//! Comparisons never stop at the first mismatch; every difference found in
//! one run is reported together.

pub mod context;
pub mod errors;
pub mod format;
pub mod logging;
pub mod model;
pub mod options;
pub mod plan;
pub mod scope;
pub mod steps;
pub mod trace;
pub mod validator;

// Re-export commonly used types
pub use context::EquivalencyValidationContext;
pub use errors::{EngineError, Result};
pub use model::{Comparands, Node, Value, ValueKind};
pub use options::{EqualityComparer, EqualityStrategy, EquivalencyOptions};
pub use plan::{modify_global_plan, reset_global_plan, EquivalencyPlan};
pub use scope::{AssertionScope, EquivalencyReport, Failure};
pub use steps::{EquivalencyStep, StepResult};
pub use validator::{EquivalencyValidator, NestedValidator};
