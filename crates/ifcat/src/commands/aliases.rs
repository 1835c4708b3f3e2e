//! Aliases command - list filter aliases used by --exclude/--only.

use crate::config::IfcatConfig;
use anyhow::Context;
use ifcat_filter::{AliasStatus, ResolvedAlias, list_aliases};
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct AliasesArgs {
    /// Project root whose .ifcat/config.toml is consulted
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &AliasesArgs) -> anyhow::Result<()> {
    let config = IfcatConfig::load(&args.root).context("failed to load config")?;
    let aliases = list_aliases(&config.aliases);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&aliases)?);
    } else {
        print!("{}", format_text(&aliases));
    }
    Ok(())
}

fn format_text(aliases: &[ResolvedAlias]) -> String {
    let mut lines = vec!["Aliases:".to_string()];
    for alias in aliases {
        let suffix = match alias.status {
            AliasStatus::Builtin | AliasStatus::Disabled => String::new(),
            status => format!("  ({})", status.as_str()),
        };
        let patterns = if alias.patterns.is_empty() {
            "(disabled)".to_string()
        } else if alias.patterns.len() > 3 {
            format!(
                "{}, ... (+{})",
                alias.patterns[..3].join(", "),
                alias.patterns.len() - 3
            )
        } else {
            alias.patterns.join(", ")
        };
        lines.push(format!("  @{:<12} {}{}", alias.name, patterns, suffix));
    }
    lines.push(String::new());
    lines.join("\n")
}
