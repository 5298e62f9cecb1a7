pub mod comparands;
pub mod node;
pub mod value;

pub use comparands::Comparands;
pub use node::Node;
pub use value::{Value, ValueKind};
