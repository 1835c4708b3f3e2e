//! Core data types for ifcat facts.
//!
//! This crate defines the vocabulary of the interface catalog: interface
//! records, their method records, and the embedded-base references that the
//! resolver consumes. These types are used by:
//! - `ifcat-facts` for per-unit extraction
//! - `ifcat-graph` for embedding resolution
//! - `ifcat` for aggregation and JSON output

mod interface;
mod visibility;

pub use interface::{BaseRef, InterfaceKey, InterfaceRecord, MethodRecord};
pub use visibility::{VisibilityMechanism, is_exported};
