//! Core types shared across the tantamount engine
//!
//! This crate provides foundational vocabulary used by the equivalence
//! engine and by assertion surfaces built on top of it:
//!
//! - **Type tokens**: TypeToken, the engine-level identity of a value's type
//! - **Path segments**: PathSegment, one step of a location inside a graph
//! - **Object identity**: ObjectIdentity, reference identity of a graph node

pub mod identity;
pub mod path;
pub mod token;

pub use identity::ObjectIdentity;
pub use path::PathSegment;
pub use token::TypeToken;
