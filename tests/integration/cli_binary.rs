//! End-to-end runs of the graphsync binary that need no remote API

use std::process::Command;
use tempfile::TempDir;

fn graphsync(test_dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_graphsync"));
    command
        .env("HOME", test_dir.path())
        .env("XDG_CONFIG_HOME", test_dir.path().join("config"))
        .env_remove("GRAPHSYNC_API_TOKEN")
        .env_remove("GRAPHSYNC_LOG")
        .arg("--quiet");
    command
}

#[test]
fn test_validate_valid_document() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("account.yaml");
    std::fs::write(
        &path,
        "follows:\n- username: jack\nlists:\n- name: News\n  members:\n  - username: cnn\n",
    )
    .unwrap();

    let output = graphsync(&test_dir).arg("validate").arg(&path).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("is valid"), "stdout: {}", stdout);
}

#[test]
fn test_validate_invalid_document_exits_nonzero() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("account.yaml");
    std::fs::write(&path, "meta_lists:\n- name: Politics\n  lists: [News]\n").unwrap();

    let output = graphsync(&test_dir).arg("validate").arg(&path).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("META"), "stderr: {}", stderr);
}

#[test]
fn test_upload_without_token_fails_before_any_request() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("account.yaml");
    std::fs::write(&path, "follows: []\n").unwrap();

    let output = graphsync(&test_dir)
        .arg("--dry-run")
        .arg("upload")
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GRAPHSYNC_API_TOKEN"), "stderr: {}", stderr);
}
