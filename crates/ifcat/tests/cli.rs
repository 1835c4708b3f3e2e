//! End-to-end tests for the `ifcat` binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

fn ifcat() -> Command {
    let mut cmd = Command::cargo_bin("ifcat").unwrap();
    // Keep the user's global config out of the runs.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("ifcat-tests-no-config"));
    cmd
}

fn touch(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

const AST: &str = r#"package ast

type Dog interface {
	Posx() int
}

type Node interface {
	Dog
	Pos() token.Pos
	End() token.Pos
}

type Expr interface {
	Node
}
"#;

fn read_catalog(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn method_names(entry: &serde_json::Value) -> Vec<&str> {
    entry["methods"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect()
}

#[test]
fn test_scan_writes_flattened_catalog() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "src/ast/ast.go", AST);
    let out = dir.path().join("out.json");

    let output = ifcat()
        .current_dir(dir.path())
        .args(["scan", "src", "-o"])
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("successfully wrote data for 3 interfaces to "));

    let catalog = read_catalog(&out);
    let entries = catalog.as_array().unwrap();
    let names: Vec<_> = entries.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Dog", "Node", "Expr"]);
    assert_eq!(entries[2]["package"], "ast");
    assert_eq!(entries[2]["filename"], "ast/ast.go");
    assert_eq!(method_names(&entries[1]), vec!["Pos", "End", "Posx"]);
    assert_eq!(method_names(&entries[2]), vec!["Pos", "End", "Posx"]);
    assert_eq!(entries[1]["methods"][0]["content"], "Pos() token.Pos");
}

#[test]
fn test_scan_defaults_to_interfaces_json_in_cwd() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "ast.go", AST);

    ifcat()
        .current_dir(dir.path())
        .arg("scan")
        .assert()
        .success();

    let catalog = read_catalog(&dir.path().join("interfaces.json"));
    assert_eq!(catalog.as_array().unwrap().len(), 3);
}

#[test]
fn test_broken_and_excluded_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "ok/ok.go", "package ok\n\ntype Runner interface {\n\tRun()\n}\n");
    touch(dir.path(), "bad/bad.go", "package bad\n\ntype Broken interface {\n\tRun(\n");
    touch(dir.path(), "nopkg/nopkg.go", "type Orphan interface{}\n");
    touch(dir.path(), "ok/ok_test.go", "package ok\n\ntype Tested interface{}\n");
    touch(dir.path(), "vendor/v/v.go", "package v\n\ntype Vendored interface{}\n");
    touch(dir.path(), "ok/internal/i.go", "package internal\n\ntype Hidden interface{}\n");

    let output = ifcat()
        .current_dir(dir.path())
        .args(["scan", ".", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());
    // Shown without -v: excluded files are not units, broken ones are.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipped 2 of 3 units"), "{stderr}");

    let catalog: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = catalog
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Runner"]);
}

#[test]
fn test_exclude_flag_replaces_defaults() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "ok/ok.go", "package ok\n\ntype Runner interface{}\n");
    touch(dir.path(), "ok/ok_test.go", "package ok\n\ntype Tested interface{}\n");
    touch(dir.path(), "mocks/m.go", "package mocks\n\ntype Mock interface{}\n");

    let output = ifcat()
        .current_dir(dir.path())
        .args(["scan", ".", "--stdout", "--compact", "--exclude", "mocks/**"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(!text.contains("\n  "));
    let catalog: serde_json::Value = serde_json::from_str(&text).unwrap();
    let names: Vec<_> = catalog
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Runner", "Tested"]);
}

#[test]
fn test_fail_on_cycle() {
    let dir = TempDir::new().unwrap();
    touch(
        dir.path(),
        "c/c.go",
        "package c\n\ntype A interface {\n\tB\n}\n\ntype B interface {\n\tA\n}\n",
    );

    ifcat()
        .current_dir(dir.path())
        .args(["scan", ".", "--stdout"])
        .assert()
        .success();

    let output = ifcat()
        .current_dir(dir.path())
        .args(["scan", ".", "--stdout", "--fail-on-cycle"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("embedding cycle"));
}

#[test]
fn test_unknown_alias_fails() {
    let dir = TempDir::new().unwrap();
    let output = ifcat()
        .current_dir(dir.path())
        .args(["scan", ".", "--exclude", "@nope"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown alias @nope"));
}

#[test]
fn test_project_config_is_applied() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "ok/ok.go", "package ok\n\ntype Runner interface{}\n");
    touch(dir.path(), "ok/mocks/m.go", "package mocks\n\ntype Mock interface{}\n");
    touch(
        dir.path(),
        ".ifcat/config.toml",
        "[scan]\nexclude = [\"@mocks\"]\n\n\
         [output]\npath = \"catalog.json\"\n\n\
         [aliases]\nmocks = [\"**/mocks/**\"]\n",
    );

    ifcat()
        .current_dir(dir.path())
        .args(["scan", "."])
        .assert()
        .success();

    let catalog = read_catalog(&dir.path().join("catalog.json"));
    assert_eq!(catalog.as_array().unwrap().len(), 1);
}

#[test]
fn test_aliases_lists_builtin_and_custom() {
    let dir = TempDir::new().unwrap();
    touch(
        dir.path(),
        ".ifcat/config.toml",
        "[aliases]\nmocks = [\"**/mocks/**\"]\n",
    );

    let output = ifcat()
        .args(["aliases"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("@tests"));
    assert!(stdout.contains("@vendor"));
    assert!(stdout.contains("@mocks"));
    assert!(stdout.contains("(custom)"));
}

#[test]
fn test_show_prints_unflattened_interfaces() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "ast.go", AST);

    let output = ifcat()
        .current_dir(dir.path())
        .args(["show", "ast.go"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ast.Node in ast.go:7"));
    assert!(stdout.contains("embeds Dog"));
    assert!(stdout.contains("   Pos() token.Pos"));
}
