//! Go interface catalog.
//!
//! Walks a source tree, extracts every exported interface with its exported
//! method signatures, flattens embedded interfaces across the whole tree, and
//! writes the result as a JSON catalog.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod walk;

pub use catalog::Catalog;
pub use config::IfcatConfig;
