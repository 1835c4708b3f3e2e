//! The export predicate.

use serde::{Deserialize, Serialize};

/// How a language determines symbol visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMechanism {
    /// Naming convention (Go: uppercase = exported)
    NamingConvention,
}

impl VisibilityMechanism {
    /// Whether `name` is visible outside its declaring namespace.
    pub fn is_exported(&self, name: &str) -> bool {
        match self {
            VisibilityMechanism::NamingConvention => is_exported(name),
        }
    }
}

/// Whether an identifier is exported: its first character is an uppercase letter.
///
/// The empty identifier is never exported.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}
