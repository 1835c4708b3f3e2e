//! Scan command - build the interface catalog for a source tree.

use crate::catalog::Catalog;
use crate::commands::build_filter;
use crate::config::IfcatConfig;
use crate::walk::collect_units;
use anyhow::Context;
use ifcat_facts::{ExtractOptions, Extractor};
use ifcat_languages::Go;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output file [default: interfaces.json]
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Exclude paths matching a glob or @alias (replaces the configured excludes)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Only include paths matching a glob or @alias
    #[arg(long, value_name = "PATTERN")]
    pub only: Vec<String>,

    /// Write compact JSON
    #[arg(long)]
    pub compact: bool,

    /// Write the catalog to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Keep units with syntax errors, extracting what parsed
    #[arg(long)]
    pub no_strict: bool,

    /// Fail when interfaces embed each other in a cycle
    #[arg(long)]
    pub fail_on_cycle: bool,
}

/// Run the scan and write the catalog. Returns the number of interfaces written.
pub fn run(args: &ScanArgs) -> anyhow::Result<usize> {
    let config = IfcatConfig::load(&args.root).context("failed to load config")?;

    let exclude = if args.exclude.is_empty() {
        config.scan.exclude()
    } else {
        args.exclude.clone()
    };
    let only = if args.only.is_empty() {
        config.scan.only()
    } else {
        args.only.clone()
    };
    let filter = build_filter(&exclude, &only, &config.aliases)?;

    let units = collect_units(&args.root, &filter, &config.scan);
    let options = ExtractOptions {
        strict_syntax: config.scan.strict_syntax() && !args.no_strict,
    };
    let extractor = Extractor::with_options(&Go, options)?;
    let catalog = Catalog::build(&extractor, &units, progress_bar());

    for skipped in &catalog.skipped {
        tracing::debug!(path = %skipped.path, reason = skipped.error.reason(), "skipped unit");
    }
    if !catalog.skipped.is_empty() {
        tracing::warn!(
            "skipped {} of {} units (run with -v for details)",
            catalog.skipped.len(),
            catalog.units
        );
    }

    if args.fail_on_cycle || config.resolve.fail_on_cycle() {
        catalog.report.clone().into_result()?;
    }

    let pretty = config.output.pretty() && !args.compact;
    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        catalog
            .write_json(&mut stdout, pretty)
            .context("failed to write catalog")?;
        writeln!(stdout)?;
    } else {
        let path = args.output.clone().unwrap_or_else(|| config.output.path());
        catalog
            .write_json_file(&path, pretty)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "successfully wrote data for {} interfaces to {}",
            catalog.len(),
            path.display()
        );
    }

    Ok(catalog.len())
}

fn progress_bar() -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} units") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
