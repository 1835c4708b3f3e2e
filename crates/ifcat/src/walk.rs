//! Source enumeration: walk the scan root and read every filtered unit.

use crate::config::ScanConfig;
use ifcat_facts::SourceUnit;
use ifcat_filter::Filter;
use ignore::WalkBuilder;
use std::path::Path;

/// Read every supported source file under `root` that passes `filter`.
///
/// Unit paths are relative to `root` with `/` separators, and the result is
/// sorted by path so the catalog order does not depend on the walk.
/// Unreadable files are logged and skipped.
pub fn collect_units(root: &Path, filter: &Filter, config: &ScanConfig) -> Vec<SourceUnit> {
    let walker = WalkBuilder::new(root)
        .hidden(!config.hidden())
        .git_ignore(config.gitignore())
        .git_global(config.gitignore())
        .git_exclude(config.gitignore())
        .require_git(false)
        .build();

    let mut units = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("walk error: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if ifcat_languages::support_for_path(path).is_none() {
            continue;
        }
        let rel = relative_path(root, path);
        if !filter.matches(Path::new(&rel)) {
            tracing::trace!(path = %rel, "filtered out");
            continue;
        }

        match std::fs::read(path) {
            Ok(content) => units.push(SourceUnit { path: rel, content }),
            Err(err) => tracing::warn!(path = %path.display(), "cannot read unit: {err}"),
        }
    }

    units.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(root = %root.display(), units = units.len(), "collected units");
    units
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        // `root` is the file itself
        _ => path.file_name().map_or(path, Path::new),
    };
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifcat_filter::AliasConfig;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn paths(units: &[SourceUnit]) -> Vec<&str> {
        units.iter().map(|u| u.path.as_str()).collect()
    }

    fn default_filter() -> Filter {
        Filter::new(&ScanConfig::default().exclude(), &[], &AliasConfig::default()).unwrap()
    }

    #[test]
    fn test_collects_sorted_go_units() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "net/http/server.go", "package http\n");
        touch(dir.path(), "io/io.go", "package io\n");
        touch(dir.path(), "README.md", "# readme\n");
        touch(dir.path(), "io/notes.txt", "x\n");

        let units = collect_units(dir.path(), &default_filter(), &ScanConfig::default());
        assert_eq!(paths(&units), vec!["io/io.go", "net/http/server.go"]);
        assert_eq!(units[0].content, b"package io\n");
    }

    #[test]
    fn test_default_excludes_apply() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "io/io.go", "package io\n");
        touch(dir.path(), "io/io_test.go", "package io\n");
        touch(dir.path(), "vendor/x/x.go", "package x\n");
        touch(dir.path(), "net/internal/a/a.go", "package a\n");
        touch(dir.path(), "runtime/cgo/cgo.go", "package cgo\n");

        let units = collect_units(dir.path(), &default_filter(), &ScanConfig::default());
        assert_eq!(paths(&units), vec!["io/io.go"]);
    }

    #[test]
    fn test_hidden_and_gitignored_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.go", "package a\n");
        touch(dir.path(), ".hidden/b.go", "package b\n");
        touch(dir.path(), "gen/c.go", "package c\n");
        touch(dir.path(), ".gitignore", "gen/\n");

        let units = collect_units(dir.path(), &default_filter(), &ScanConfig::default());
        assert_eq!(paths(&units), vec!["a.go"]);

        let everything = ScanConfig {
            hidden: Some(true),
            gitignore: Some(false),
            ..Default::default()
        };
        let units = collect_units(dir.path(), &default_filter(), &everything);
        assert_eq!(paths(&units), vec![".hidden/b.go", "a.go", "gen/c.go"]);
    }

    #[test]
    fn test_single_file_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "io.go", "package io\n");
        let root = dir.path().join("io.go");
        let units = collect_units(&root, &default_filter(), &ScanConfig::default());
        assert_eq!(paths(&units), vec!["io.go"]);
    }
}
