//! Language support for ifcat.
//!
//! This crate provides the `Language` trait and its implementations. Each
//! language struct IS its support implementation: it knows its grammar, the
//! node kinds the declaration queries match on, and the table of built-in
//! types that are never namespace-qualified.
//!
//! # Feature Flags
//!
//! - `lang-go` (default): Go, via the statically linked `tree-sitter-go` grammar
//!
//! # Example
//!
//! ```ignore
//! use ifcat_languages::{parse, support_for_path};
//! use std::path::Path;
//!
//! let lang = support_for_path(Path::new("io/io.go")).expect("go is registered");
//! let tree = parse(lang, b"package io\n").expect("parses");
//! assert_eq!(tree.root_node().kind(), "source_file");
//! ```

mod parsers;
mod registry;
mod traits;

#[cfg(feature = "lang-go")]
pub mod go;

pub use parsers::{LanguageError, parse, parser_for};
pub use registry::{support_for_extension, support_for_path};
pub use traits::Language;

pub use ifcat_facts_core::VisibilityMechanism;

#[cfg(feature = "lang-go")]
pub use go::Go;
