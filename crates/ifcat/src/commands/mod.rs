//! Command implementations for the `ifcat` binary.

use ifcat_filter::{AliasConfig, Filter, FilterError};

pub mod aliases;
pub mod scan;
pub mod show;

/// Build a filter from exclude/only patterns, logging alias warnings.
pub fn build_filter(
    exclude: &[String],
    only: &[String],
    aliases: &AliasConfig,
) -> Result<Filter, FilterError> {
    let filter = Filter::new(exclude, only, aliases)?;
    for warning in filter.warnings() {
        tracing::warn!("{warning}");
    }
    Ok(filter)
}
