//! Parallel extraction over many source units.

use crate::{ExtractError, Extractor};
use ifcat_facts_core::InterfaceRecord;
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;

/// One source file, already read and filtered by the caller.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path relative to the scan root.
    pub path: String,
    pub content: Vec<u8>,
}

/// A unit that produced no records, and why.
#[derive(Debug)]
pub struct SkippedUnit {
    pub path: String,
    pub error: ExtractError,
}

/// Records from every unit that extracted cleanly, plus the skipped units.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Unresolved records, in unit order then declaration order.
    pub records: Vec<InterfaceRecord>,
    pub skipped: Vec<SkippedUnit>,
    /// Number of units scanned, including skipped ones.
    pub units: usize,
}

/// Extract every unit in parallel. A failing unit is skipped, never fatal.
pub fn scan_units(extractor: &Extractor, units: &[SourceUnit]) -> ScanOutcome {
    scan_units_with_progress(extractor, units, ProgressBar::hidden())
}

/// Like [`scan_units`], ticking `progress` once per unit.
pub fn scan_units_with_progress(
    extractor: &Extractor,
    units: &[SourceUnit],
    progress: ProgressBar,
) -> ScanOutcome {
    progress.set_length(units.len() as u64);

    // Indexed parallel collect keeps unit order, so the catalog is deterministic.
    let results: Vec<Result<Vec<InterfaceRecord>, ExtractError>> = units
        .par_iter()
        .progress_with(progress.clone())
        .map(|unit| extractor.extract_from_unit(&unit.path, &unit.content))
        .collect();
    progress.finish_and_clear();

    let mut outcome = ScanOutcome {
        units: units.len(),
        ..Default::default()
    };
    for (unit, result) in units.iter().zip(results) {
        match result {
            Ok(records) => outcome.records.extend(records),
            Err(error) => {
                tracing::warn!(
                    path = %unit.path,
                    reason = error.reason(),
                    "skipping unit: {error}"
                );
                outcome.skipped.push(SkippedUnit {
                    path: unit.path.clone(),
                    error,
                });
            }
        }
    }
    outcome
}
