//! Catalog aggregation: scan every unit, resolve embeddings once, write JSON.

use ifcat_facts::{Extractor, InterfaceRecord, SkippedUnit, SourceUnit, scan_units_with_progress};
use ifcat_graph::{ResolveReport, resolve_catalog};
use indicatif::ProgressBar;
use std::io::Write;
use std::path::Path;

/// The resolved interface catalog of one scan.
#[derive(Debug)]
pub struct Catalog {
    /// Resolved records, in unit order then declaration order.
    pub records: Vec<InterfaceRecord>,
    pub skipped: Vec<SkippedUnit>,
    pub units: usize,
    pub report: ResolveReport,
}

impl Catalog {
    /// Extract every unit, then flatten embeddings across the whole catalog.
    pub fn build(extractor: &Extractor, units: &[SourceUnit], progress: ProgressBar) -> Self {
        let outcome = scan_units_with_progress(extractor, units, progress);
        let mut records = outcome.records;
        let report = resolve_catalog(&mut records);

        tracing::debug!(
            units = outcome.units,
            skipped = outcome.skipped.len(),
            interfaces = records.len(),
            flattened = report.flattened,
            unresolved = report.unresolved.len(),
            cycles = report.cycles.len(),
            "built catalog"
        );

        Self {
            records,
            skipped: outcome.skipped,
            units: outcome.units,
            report,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the records as a JSON array.
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, &self.records)
        } else {
            serde_json::to_writer(writer, &self.records)
        }
    }

    pub fn write_json_file(&self, path: &Path, pretty: bool) -> std::io::Result<()> {
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_json(&mut writer, pretty)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
