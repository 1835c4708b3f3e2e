//! Interface fact extraction.
//!
//! This crate provides:
//! - The declaration query engine (interface declarations, members, package clause, imports)
//! - The type qualifier that rewrites bare type references to `pkg.Type`
//! - Per-unit extraction into [`InterfaceRecord`]s
//! - A parallel scan over many units that skips (and reports) broken ones
//!
//! Embedding resolution is a whole-catalog pass and lives in `ifcat-graph`.

mod error;
pub mod extract;
pub mod qualify;
pub mod query;
mod scan;

pub use error::ExtractError;
pub use extract::{ExtractOptions, Extractor};
pub use qualify::TypeQualifier;
pub use query::{DeclarationQueries, ImportTable, InterfaceDecl, Member};
pub use scan::{ScanOutcome, SkippedUnit, SourceUnit, scan_units, scan_units_with_progress};

// Re-export core types for convenience
pub use ifcat_facts_core::{BaseRef, InterfaceKey, InterfaceRecord, MethodRecord, is_exported};
