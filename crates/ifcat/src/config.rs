//! Configuration for ifcat.
//!
//! Loads config from:
//! 1. Global: `$XDG_CONFIG_HOME/ifcat/config.toml` (or `~/.config/ifcat/config.toml`)
//! 2. Per-project: `<root>/.ifcat/config.toml` (overrides global)
//!
//! Command-line flags override both.
//!
//! Example config.toml:
//! ```toml
//! [scan]
//! exclude = ["@tests", "@vendor"]
//! strict_syntax = false
//!
//! [output]
//! path = "api/interfaces.json"
//! pretty = false
//!
//! [resolve]
//! fail_on_cycle = true
//!
//! [aliases]
//! mocks = ["**/mocks/**"]
//! ```

use ifcat_filter::AliasConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Excludes applied when neither config nor flags name any.
pub const DEFAULT_EXCLUDE: &[&str] = &["@tests", "@vendor", "@internal", "@cgo"];

pub const DEFAULT_OUTPUT: &str = "interfaces.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `[scan]`: which files are walked and how strictly they are parsed.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    pub exclude: Option<Vec<String>>,
    pub only: Option<Vec<String>>,
    /// Skip units whose syntax tree has error nodes.
    pub strict_syntax: Option<bool>,
    /// Walk hidden files and directories.
    pub hidden: Option<bool>,
    /// Respect `.gitignore` files.
    pub gitignore: Option<bool>,
}

impl ScanConfig {
    pub fn exclude(&self) -> Vec<String> {
        match &self.exclude {
            Some(patterns) => patterns.clone(),
            None => DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn only(&self) -> Vec<String> {
        self.only.clone().unwrap_or_default()
    }

    pub fn strict_syntax(&self) -> bool {
        self.strict_syntax.unwrap_or(true)
    }

    pub fn hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    pub fn gitignore(&self) -> bool {
        self.gitignore.unwrap_or(true)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            exclude: other.exclude.or(self.exclude),
            only: other.only.or(self.only),
            strict_syntax: other.strict_syntax.or(self.strict_syntax),
            hidden: other.hidden.or(self.hidden),
            gitignore: other.gitignore.or(self.gitignore),
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub pretty: Option<bool>,
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            path: other.path.or(self.path),
            pretty: other.pretty.or(self.pretty),
        }
    }
}

/// `[resolve]`
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResolveConfig {
    /// Exit with an error when interfaces embed each other in a cycle.
    pub fail_on_cycle: Option<bool>,
}

impl ResolveConfig {
    pub fn fail_on_cycle(&self) -> bool {
        self.fail_on_cycle.unwrap_or(false)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            fail_on_cycle: other.fail_on_cycle.or(self.fail_on_cycle),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IfcatConfig {
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub resolve: ResolveConfig,
    pub aliases: AliasConfig,
}

impl IfcatConfig {
    /// Load the global config, then the project config under `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    /// Like [`IfcatConfig::load`] with an explicit global config path.
    pub fn load_from(global: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(global_path) = global
            && let Some(global) = Self::load_file(global_path)?
        {
            config = config.merge(global);
        }

        let project_path = root.join(".ifcat").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = config.merge(project);
        }

        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("ifcat").join("config.toml"))
    }

    /// A missing file is not an error; an unreadable or malformed one is.
    fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Layer `other` on top of `self`: fields set in `other` win.
    fn merge(self, other: Self) -> Self {
        let mut aliases = self.aliases;
        aliases.merge(other.aliases);
        Self {
            scan: self.scan.merge(other.scan),
            output: self.output.merge(other.output),
            resolve: self.resolve.merge(other.resolve),
            aliases,
        }
    }
}
