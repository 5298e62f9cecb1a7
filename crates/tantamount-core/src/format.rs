//! Rendering seam for failure messages
//!
//! The engine never formats values inline; every rendering that ends up in
//! a failure message goes through this trait so an assertion surface can
//! swap in its own formatter.

use crate::model::Value;

/// Renders values for failure messages
pub trait ValueFormatter: Send + Sync {
    /// Produce the human-readable rendering of a value
    fn render(&self, value: &Value) -> String;
}

/// Formatter backed by the value model's own rendering
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl ValueFormatter for DefaultFormatter {
    fn render(&self, value: &Value) -> String {
        value.to_string()
    }
}
