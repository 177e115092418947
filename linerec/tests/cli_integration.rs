//! Integration tests for linerec CLI

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_linerec(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "linerec", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn create_data_dir(root: &Path) {
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "x\ny\n").unwrap();
    fs::write(root.join("sub/b.txt"), "z\n").unwrap();
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_linerec(&["--help"]);

    assert!(success);
    assert!(stdout.contains("linerec"));
    assert!(stdout.contains("--count"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--encoding"));
    assert!(stdout.contains("--show-source"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_linerec(&["--version"]);

    assert!(success);
    assert!(stdout.contains("linerec"));
}

#[test]
fn test_streams_all_lines() {
    let temp = tempfile::tempdir().unwrap();
    create_data_dir(temp.path());

    let (stdout, _, success) = run_linerec(&[temp.path().to_str().unwrap()]);

    assert!(success);
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["x", "y", "z"]);
}

#[test]
fn test_count_mode() {
    let temp = tempfile::tempdir().unwrap();
    create_data_dir(temp.path());

    let (stdout, _, success) = run_linerec(&[temp.path().to_str().unwrap(), "--count"]);

    assert!(success);
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_json_output() {
    let temp = tempfile::tempdir().unwrap();
    create_data_dir(temp.path());

    let (stdout, _, success) = run_linerec(&[temp.path().to_str().unwrap(), "--output", "json"]);

    assert!(success);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("Invalid JSON output"))
        .collect();

    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["sequence"], (i + 1) as u64);
        assert!(record.get("source").is_some());
        assert!(record.get("line").is_some());
    }
}

#[test]
fn test_show_source_prefixes_lines() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("one.txt"), "hello\n").unwrap();

    let (stdout, _, success) =
        run_linerec(&[temp.path().to_str().unwrap(), "--show-source"]);

    assert!(success);
    let line = stdout.lines().next().expect("no output");
    assert!(line.starts_with("1\t"));
    assert!(line.contains("one.txt"));
    assert!(line.ends_with("\thello"));
}

#[test]
fn test_invalid_path() {
    let (_, stderr, success) = run_linerec(&["/nonexistent/path"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_empty_directory_fails() {
    let temp = tempfile::tempdir().unwrap();

    let (_, stderr, success) = run_linerec(&[temp.path().to_str().unwrap()]);

    assert!(!success);
    assert!(stderr.contains("no files to read"));
}

#[test]
fn test_count_of_empty_directory_is_zero() {
    let temp = tempfile::tempdir().unwrap();

    let (stdout, _, success) = run_linerec(&[temp.path().to_str().unwrap(), "--count"]);

    assert!(success);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_unknown_encoding_fails() {
    let temp = tempfile::tempdir().unwrap();
    create_data_dir(temp.path());

    let (_, stderr, success) = run_linerec(&[
        temp.path().to_str().unwrap(),
        "--encoding",
        "klingon-9",
    ]);

    assert!(!success);
    assert!(stderr.contains("unknown encoding"));
}
