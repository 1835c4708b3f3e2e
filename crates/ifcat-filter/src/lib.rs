//! Path filtering for `--exclude` and `--only`.
//!
//! Supports:
//! - Glob patterns: `--exclude="*_mock.go"`, `--only="net/**"`
//! - Aliases: `--exclude=@tests`, `--only=@generated`
//!
//! Patterns use gitignore syntax and are matched against paths relative to the
//! scan root. Config can override or add aliases via `[aliases]`.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("unknown alias @{0}")]
    UnknownAlias(String),
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
    #[error("failed to build filter: {0}")]
    Build(#[source] ignore::Error),
}

/// Alias table for `@name` expansion.
///
/// ```toml
/// [aliases]
/// mocks = ["**/mocks/**"]   # custom alias
/// internal = []             # disable built-in @internal
/// tests = ["*_test.go"]     # override built-in @tests
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AliasConfig {
    /// Alias name to patterns. An empty list disables the alias.
    #[serde(flatten)]
    pub entries: BTreeMap<String, Vec<String>>,
}

impl AliasConfig {
    /// Names of all built-in aliases.
    pub fn builtin_names() -> &'static [&'static str] {
        &["tests", "vendor", "internal", "cgo", "generated"]
    }

    /// Patterns for an alias, falling back to builtins.
    /// Returns None if the alias is unknown or disabled.
    pub fn get(&self, name: &str) -> Option<Vec<String>> {
        if let Some(values) = self.entries.get(name) {
            if values.is_empty() {
                return None;
            }
            return Some(values.clone());
        }
        Self::builtin(name)
    }

    /// Layer `other` on top of `self`; its entries win.
    pub fn merge(&mut self, other: AliasConfig) {
        self.entries.extend(other.entries);
    }

    fn builtin(name: &str) -> Option<Vec<String>> {
        let patterns: &[&str] = match name {
            "tests" => &["*_test.go", "**/testdata/**"],
            "vendor" => &["**/vendor/**"],
            "internal" => &["**/internal/**"],
            "cgo" => &["**/cgo/**", "*cgo*.go"],
            "generated" => &["*.pb.go", "*_generated.go", "zz_generated*.go", "*_string.go"],
            _ => return None,
        };
        Some(patterns.iter().map(|p| p.to_string()).collect())
    }
}

/// Status of an alias, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasStatus {
    Builtin,
    Custom,
    /// Built-in alias disabled via an empty list in config
    Disabled,
    /// Built-in alias given new patterns in config
    Overridden,
}

impl AliasStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AliasStatus::Builtin => "builtin",
            AliasStatus::Custom => "custom",
            AliasStatus::Disabled => "disabled",
            AliasStatus::Overridden => "overridden",
        }
    }

    fn is_builtin(self) -> bool {
        !matches!(self, AliasStatus::Custom)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAlias {
    pub name: String,
    pub patterns: Vec<String>,
    pub status: AliasStatus,
}

/// Compiled exclude/only matchers.
#[derive(Debug)]
pub struct Filter {
    exclude_matcher: Option<Gitignore>,
    only_matcher: Option<Gitignore>,
    warnings: Vec<String>,
}

impl Filter {
    /// Build a filter from exclude/only patterns.
    ///
    /// Patterns starting with `@` are expanded as aliases. Disabled aliases
    /// match nothing and leave a warning.
    pub fn new(
        exclude: &[String],
        only: &[String],
        config: &AliasConfig,
    ) -> Result<Self, FilterError> {
        let mut warnings = Vec::new();
        let exclude_matcher = compile(exclude, config, &mut warnings)?;
        let only_matcher = compile(only, config, &mut warnings)?;
        Ok(Self {
            exclude_matcher,
            only_matcher,
            warnings,
        })
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether a relative path passes the filter.
    pub fn matches(&self, path: &Path) -> bool {
        if let Some(ref only) = self.only_matcher
            && !only.matched(path, false).is_ignore()
        {
            return false;
        }

        if let Some(ref exclude) = self.exclude_matcher
            && exclude.matched(path, false).is_ignore()
        {
            return false;
        }

        true
    }
}

fn compile(
    patterns: &[String],
    config: &AliasConfig,
    warnings: &mut Vec<String>,
) -> Result<Option<Gitignore>, FilterError> {
    let resolved = resolve_patterns(patterns, config, warnings)?;
    if resolved.is_empty() {
        return Ok(None);
    }
    build_matcher(&resolved).map(Some)
}

fn resolve_patterns(
    patterns: &[String],
    config: &AliasConfig,
    warnings: &mut Vec<String>,
) -> Result<Vec<String>, FilterError> {
    let mut result = Vec::new();
    for pattern in patterns {
        let Some(alias) = pattern.strip_prefix('@') else {
            result.push(pattern.clone());
            continue;
        };
        if config.entries.get(alias).is_some_and(|p| p.is_empty()) {
            warnings.push(format!("@{alias} is disabled (matches nothing)"));
            continue;
        }
        match config.get(alias) {
            Some(ps) => result.extend(ps),
            None => return Err(FilterError::UnknownAlias(alias.to_string())),
        }
    }
    Ok(result)
}

fn build_matcher(patterns: &[String]) -> Result<Gitignore, FilterError> {
    let mut builder = GitignoreBuilder::new("");
    for pattern in patterns {
        builder
            .add_line(None, pattern)
            .map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
    }
    builder.build().map_err(FilterError::Build)
}

/// Every alias with its effective patterns: built-ins first, then custom, by name.
pub fn list_aliases(config: &AliasConfig) -> Vec<ResolvedAlias> {
    let builtin_names = AliasConfig::builtin_names();
    let mut aliases = Vec::new();

    for &name in builtin_names {
        let (patterns, status) = match config.entries.get(name) {
            Some(user) if user.is_empty() => (Vec::new(), AliasStatus::Disabled),
            Some(user) => (user.clone(), AliasStatus::Overridden),
            None => (
                AliasConfig::builtin(name).unwrap_or_default(),
                AliasStatus::Builtin,
            ),
        };
        aliases.push(ResolvedAlias {
            name: name.to_string(),
            patterns,
            status,
        });
    }

    let builtin_set: HashSet<&str> = builtin_names.iter().copied().collect();
    for (name, patterns) in &config.entries {
        if !builtin_set.contains(name.as_str()) {
            aliases.push(ResolvedAlias {
                name: name.clone(),
                patterns: patterns.clone(),
                status: AliasStatus::Custom,
            });
        }
    }

    aliases.sort_by(|a, b| {
        b.status
            .is_builtin()
            .cmp(&a.status.is_builtin())
            .then_with(|| a.name.cmp(&b.name))
    });
    aliases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_glob_pattern() {
        let filter = Filter::new(&strings(&["*_mock.go"]), &[], &AliasConfig::default()).unwrap();

        assert!(!filter.matches(Path::new("pkg/store_mock.go")));
        assert!(filter.matches(Path::new("pkg/store.go")));
    }

    #[test]
    fn test_default_aliases_match_excluded_words() {
        let filter = Filter::new(
            &strings(&["@tests", "@vendor", "@internal", "@cgo"]),
            &[],
            &AliasConfig::default(),
        )
        .unwrap();

        assert!(!filter.matches(Path::new("io/io_test.go")));
        assert!(!filter.matches(Path::new("io/testdata/x.go")));
        assert!(!filter.matches(Path::new("vendor/golang.org/x/net/a.go")));
        assert!(!filter.matches(Path::new("net/internal/socktest/sys.go")));
        assert!(!filter.matches(Path::new("runtime/cgo/callbacks.go")));
        assert!(!filter.matches(Path::new("net/cgo_unix.go")));

        assert!(filter.matches(Path::new("io/io.go")));
        assert!(filter.matches(Path::new("net/http/server.go")));
    }

    #[test]
    fn test_unknown_alias_error() {
        let err = Filter::new(&strings(&["@unknown"]), &[], &AliasConfig::default()).unwrap_err();
        assert!(matches!(err, FilterError::UnknownAlias(ref name) if name == "unknown"));
        assert_eq!(err.to_string(), "unknown alias @unknown");
    }

    #[test]
    fn test_disabled_alias_warning() {
        let mut config = AliasConfig::default();
        config.entries.insert("tests".to_string(), vec![]);

        let filter = Filter::new(&strings(&["@tests"]), &[], &config).unwrap();

        assert_eq!(filter.warnings().len(), 1);
        assert!(filter.warnings()[0].contains("disabled"));
        assert!(filter.matches(Path::new("foo_test.go")));
        assert!(filter.matches(Path::new("pkg/testdata/case.go")));
    }

    #[test]
    fn test_config_override() {
        let mut config = AliasConfig::default();
        config
            .entries
            .insert("tests".to_string(), strings(&["my_tests/**"]));

        let filter = Filter::new(&strings(&["@tests"]), &[], &config).unwrap();

        assert!(!filter.matches(Path::new("my_tests/foo.go")));
        assert!(filter.matches(Path::new("foo_test.go")));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::new(&[], &[], &AliasConfig::default()).unwrap();
        assert!(filter.warnings().is_empty());
        assert!(filter.matches(Path::new("foo_test.go")));
        assert!(filter.matches(Path::new("vendor/v/v.go")));
    }

    #[test]
    fn test_only_mode() {
        let filter = Filter::new(&[], &strings(&["net/**"]), &AliasConfig::default()).unwrap();

        assert!(filter.matches(Path::new("net/http/server.go")));
        assert!(!filter.matches(Path::new("io/io.go")));
    }

    #[test]
    fn test_aliases_from_toml() {
        let config: AliasConfig =
            toml::from_str("mocks = [\"**/mocks/**\"]\ninternal = []\n").unwrap();
        assert_eq!(config.get("mocks"), Some(strings(&["**/mocks/**"])));
        assert_eq!(config.get("internal"), None);
        assert!(config.get("vendor").is_some());
    }

    #[test]
    fn test_merge_prefers_later_entries() {
        let mut global = AliasConfig::default();
        global.entries.insert("mocks".to_string(), strings(&["mocks/**"]));
        global.entries.insert("fakes".to_string(), strings(&["fakes/**"]));
        let mut project = AliasConfig::default();
        project.entries.insert("mocks".to_string(), strings(&["**/mocks/**"]));

        global.merge(project);
        assert_eq!(global.get("mocks"), Some(strings(&["**/mocks/**"])));
        assert_eq!(global.get("fakes"), Some(strings(&["fakes/**"])));
    }

    #[test]
    fn test_list_aliases() {
        let mut config = AliasConfig::default();
        config.entries.insert("internal".to_string(), vec![]);
        config
            .entries
            .insert("tests".to_string(), strings(&["*_test.go"]));
        config
            .entries
            .insert("mocks".to_string(), strings(&["**/mocks/**"]));

        let aliases = list_aliases(&config);
        let status = |name: &str| aliases.iter().find(|a| a.name == name).unwrap().status;

        assert_eq!(status("internal"), AliasStatus::Disabled);
        assert_eq!(status("tests"), AliasStatus::Overridden);
        assert_eq!(status("vendor"), AliasStatus::Builtin);
        assert_eq!(status("mocks"), AliasStatus::Custom);
        assert_eq!(aliases.last().unwrap().name, "mocks");
    }
}
