//! Show command - extract one file and print its interfaces as text.
//!
//! Embedded bases are listed unflattened, with import aliases replaced by
//! their packages: flattening needs the whole catalog.

use anyhow::Context;
use ifcat_facts::{ExtractOptions, Extractor};
use ifcat_languages::Go;
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Go source file
    pub file: PathBuf,

    /// Keep going past syntax errors
    #[arg(long)]
    pub no_strict: bool,
}

pub fn run(args: &ShowArgs) -> anyhow::Result<()> {
    let source = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let extractor = Extractor::with_options(
        &Go,
        ExtractOptions {
            strict_syntax: !args.no_strict,
        },
    )?;
    let path = args.file.to_string_lossy().replace('\\', "/");
    let records = extractor.extract_from_unit(&path, &source)?;

    for record in &records {
        println!("{record}");
    }
    Ok(())
}
