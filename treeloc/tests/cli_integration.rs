//! Integration tests for treeloc CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn run_treeloc(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_treeloc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// proj/
///   a.py        2 lines, 2 non-empty
///   README.md   2 lines, 1 non-empty
///   sub/b.py    1 line
///   node_modules/x.js
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.py"), "x = 1\ny = 2\n").unwrap();
    fs::write(root.join("README.md"), "# t\n\n").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/b.py"), "z = 3\n").unwrap();
    fs::create_dir(root.join("node_modules")).unwrap();
    fs::write(root.join("node_modules/x.js"), "var x;\n").unwrap();
    dir
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_treeloc(&["--help"]);

    assert!(success);
    assert!(stdout.contains("treeloc"));
    assert!(stdout.contains("--metric"));
    assert!(stdout.contains("--depth"));
    assert!(stdout.contains("--exclude"));
    assert!(stdout.contains("--language"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_treeloc(&["--version"]);

    assert!(success);
    assert!(stdout.contains("treeloc"));
}

#[test]
fn test_table_output() {
    let dir = fixture();
    let (stdout, _, success) = run_treeloc(&[path_arg(dir.path())]);

    assert!(success);
    assert!(stdout.starts_with("Share of root by lines of code"));
    assert!(stdout.contains("  sub/"));
    assert!(stdout.contains("    b.py"));
    assert!(stdout.contains("33.3% Python"));
    assert!(stdout.contains("66.7% Python"));
    assert!(stdout.contains("100.0% Markdown"));
    assert!(!stdout.contains("node_modules"));
    assert!(!stdout.contains("JavaScript"));
    assert!(stdout.contains("Total (3 files, 2 directories)"));
    assert!(stdout.contains("2 Markdown  3 Python"));
}

#[test]
fn test_metric_switch() {
    let dir = fixture();
    let (stdout, _, success) = run_treeloc(&[path_arg(dir.path()), "--metric", "non-empty"]);

    assert!(success);
    assert!(stdout.starts_with("Share of root by non empty lines of code"));
    assert!(stdout.contains("1 Markdown  3 Python"));

    let (stdout, _, success) = run_treeloc(&[path_arg(dir.path()), "-m", "size"]);
    assert!(success);
    assert!(stdout.starts_with("Share of root by size"));
    assert!(stdout.contains("5 Markdown  18 Python"));
}

#[test]
fn test_depth_limit() {
    let dir = fixture();
    let (stdout, _, success) = run_treeloc(&[path_arg(dir.path()), "--depth", "1"]);

    assert!(success);
    assert!(stdout.contains("  sub/ [+]"));
    assert!(!stdout.contains("b.py"));
}

#[test]
fn test_exclude_and_language() {
    let dir = fixture();
    fs::write(dir.path().join("lib.rs"), "fn main() {}\n").unwrap();

    let (stdout, _, success) = run_treeloc(&[
        path_arg(dir.path()),
        "--exclude",
        "sub",
        "--language",
        "Rust=.rs",
    ]);

    assert!(success);
    assert!(!stdout.contains("sub/"));
    assert!(stdout.contains("100.0% Rust"));
    assert!(stdout.contains("100.0% Python"));
}

#[test]
fn test_show_counts() {
    let dir = fixture();
    let (stdout, _, success) = run_treeloc(&[path_arg(dir.path()), "--show-counts"]);

    assert!(success);
    assert!(stdout.contains("33.3% Python (1/3)"));
    assert!(stdout.contains("66.7% Python (2/3)"));
    assert!(stdout.contains("100.0% Markdown (2/2)"));
}

#[test]
fn test_extra_ignores() {
    let dir = fixture();
    let (stdout, _, success) = run_treeloc(&[
        path_arg(dir.path()),
        "--ignore",
        "SUB",
        "--ignore-ext",
        "md",
    ]);

    assert!(success);
    assert!(!stdout.contains("sub/"));
    assert!(!stdout.contains("Markdown"));
    assert!(stdout.contains("100.0% Python"));
    assert!(stdout.contains("Total (1 files, 1 directories)"));
}

#[test]
fn test_sort_by_metric_reversed() {
    let dir = fixture();
    let root = path_arg(dir.path());

    let position = |stdout: &str, name: &str| stdout.find(name).unwrap();

    let (stdout, _, success) = run_treeloc(&[root, "--depth", "1", "--sort", "metric"]);
    assert!(success);
    assert!(position(&stdout, "a.py") < position(&stdout, "sub/"));

    let (stdout, _, success) =
        run_treeloc(&[root, "--depth", "1", "--sort", "metric", "--reverse"]);
    assert!(success);
    assert!(position(&stdout, "sub/") < position(&stdout, "a.py"));
}

#[test]
fn test_json_output() {
    let dir = fixture();
    let (stdout, _, success) = run_treeloc(&[path_arg(dir.path()), "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");

    let root = &parsed["tree"]["root"];
    assert_eq!(root["content"]["Python"]["line_count"], 3);
    assert_eq!(root["content"]["Python"]["non_empty_line_count"], 3);
    assert_eq!(root["content"]["Markdown"]["size_bytes"], 5);
    assert!(root["children"].is_array());

    let outline = &parsed["outline"];
    assert_eq!(outline["metric"], "LineCount");
    assert_eq!(outline["summary"]["files"], 3);
    assert_eq!(outline["rows"][0]["depth"], 0);
}

#[test]
fn test_invalid_path() {
    let (_, stderr, success) = run_treeloc(&["/nonexistent/path/that/does/not/exist"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("path does not exist"));
}

#[test]
fn test_invalid_language() {
    let dir = fixture();
    let (_, stderr, success) = run_treeloc(&[path_arg(dir.path()), "--language", "Rust"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("invalid language definition"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = fixture();
    let (stdout, stderr, success) = run_treeloc(&[path_arg(dir.path()), "--verbose"]);

    assert!(success);
    assert!(stdout.contains("Python"));
    assert!(stderr.contains("DEBUG"));
}
