//! End-to-end tests driving the compiled `treesum` binary.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

struct CommandResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

fn treesum(path: &Path) -> CommandResult {
    let output = Command::new(env!("CARGO_BIN_EXE_treesum"))
        .arg(path)
        .output()
        .expect("failed to run treesum");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

#[test]
fn hashes_a_file_to_hex_plus_newline() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("hello.txt"), b"hello\n").unwrap();

    let result = treesum(&tmp.path().join("hello.txt"));
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(
        result.stdout,
        "ce013625030ba8dba906f756967f9e9ca394464a\n"
    );
}

#[test]
fn hashes_a_directory() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("hello.txt"), b"hello\n").unwrap();

    let result = treesum(tmp.path());
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(
        result.stdout,
        "aaa96ced2d9a1c8e72c56b253a0e2fe78393feb7\n"
    );
}

#[test]
fn missing_path_fails_with_message() {
    let tmp = TempDir::new().unwrap();

    let result = treesum(&tmp.path().join("does-not-exist"));
    assert_ne!(result.exit_code, 0);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.starts_with("fatal:"), "stderr: {}", result.stderr);
}

#[test]
fn empty_directory_fails() {
    let tmp = TempDir::new().unwrap();

    let result = treesum(tmp.path());
    assert_ne!(result.exit_code, 0);
    assert!(
        result.stderr.contains("no hashable entries"),
        "stderr: {}",
        result.stderr
    );
}
