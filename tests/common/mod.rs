use std::path::PathBuf;
use std::sync::Once;

use tempfile::TempDir;

#[allow(dead_code)]
static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn setup_test_env() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
            .is_test(true)
            .init();
    });
}

#[allow(dead_code)]
pub const MERGE_SHA: &str = "c0ffee00deadbeef0123456789abcdef01234567";

#[allow(dead_code)]
pub fn pull_request_payload(action: &str, merged: bool) -> String {
    let merge_commit_sha = if merged { Some(MERGE_SHA) } else { None };
    serde_json::json!({
        "action": action,
        "number": 5,
        "pull_request": {
            "number": 5,
            "merged": merged,
            "merge_commit_sha": merge_commit_sha
        },
        "repository": {
            "name": "widgets",
            "owner": { "login": "octo" }
        }
    })
    .to_string()
}

/// Writes `payload` to `event.json` in a fresh temp dir.
#[allow(dead_code)]
pub fn write_event(payload: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("event.json");
    std::fs::write(&path, payload).expect("Failed to write event file");
    (dir, path)
}
