//! Embedding resolution over the interface catalog.
//!
//! The "embeds" relation between interfaces is a directed graph whose nodes
//! are the catalog's records. [`resolve_catalog`] walks it depth-first and
//! flattens every record's bases into its method list.

mod resolve;

pub use resolve::{Cycle, ResolveError, ResolveReport, UnresolvedBase, resolve_catalog};
