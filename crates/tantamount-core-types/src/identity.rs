//! Reference identity for graph nodes
//!
//! Cycle detection needs to recognize that it has reached the same node
//! again, independently of the node's contents. Identities are derived
//! from node addresses and are only meaningful within one process.

/// Reference identity of a shared value node
///
/// Two identities compare equal exactly when they denote the same node in
/// memory. An identity says nothing about the node's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectIdentity(usize);

impl ObjectIdentity {
    /// Create an identity from a raw node address
    pub fn from_addr(addr: usize) -> Self {
        Self(addr)
    }
}

impl std::fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
