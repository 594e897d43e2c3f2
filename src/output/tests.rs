//! Tests for output module

use super::*;
use crate::error::Error;
use crate::types::RunId;
use chrono::NaiveDate;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

fn run_id() -> RunId {
    RunId::from_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
}

// ============================================================================
// Layout Tests
// ============================================================================

#[test]
fn test_layout_paths() {
    let root = Path::new("/data");
    assert_eq!(
        backup_dir(root, run_id()),
        Path::new("/data/hubspot-backup/2024-01-31")
    );
    assert_eq!(
        endpoint_dir(root, run_id(), "blog-posts"),
        Path::new("/data/hubspot-backup/2024-01-31/blog-posts")
    );
    assert_eq!(
        record_path(root, run_id(), "deals", 42),
        Path::new("/data/hubspot-backup/2024-01-31/deals/42.json")
    );
}

// ============================================================================
// FileSink Tests
// ============================================================================

#[tokio::test]
async fn test_file_sink_writes_record() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), run_id());

    let item = json!({"id": 1, "properties": {"name": "Acme"}});
    let path = sink.persist("companies", 0, &item).await.unwrap();

    assert_eq!(path, sink.endpoint_dir("companies").join("0.json"));
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, item);
}

#[tokio::test]
async fn test_file_sink_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), run_id());

    sink.persist("lists", 3, &json!({"v": "old", "extra": true}))
        .await
        .unwrap();
    let path = sink.persist("lists", 3, &json!({"v": "new"})).await.unwrap();

    assert_eq!(std::fs::read_to_string(path).unwrap(), r#"{"v":"new"}"#);
    assert_eq!(
        std::fs::read_dir(sink.endpoint_dir("lists")).unwrap().count(),
        1
    );
}

#[tokio::test]
async fn test_file_sink_creates_dir_idempotently() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), run_id());

    for index in 0..3 {
        sink.persist("pages", index, &json!(index)).await.unwrap();
    }

    let mut names: Vec<String> = std::fs::read_dir(sink.endpoint_dir("pages"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["0.json", "1.json", "2.json"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_file_sink_dir_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), run_id());
    sink.persist("deals", 0, &json!({})).await.unwrap();

    let mode = std::fs::metadata(sink.endpoint_dir("deals"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o077, 0);
}

#[tokio::test]
async fn test_file_sink_reports_persistence_error() {
    let dir = tempdir().unwrap();
    // A regular file where the backup directory should go
    std::fs::write(dir.path().join(BACKUP_DIR_NAME), b"not a dir").unwrap();

    let sink = FileSink::new(dir.path(), run_id());
    let result = sink.persist("deals", 0, &json!({"id": 1})).await;

    match result {
        Err(Error::Persistence { path, .. }) => assert!(path.contains("deals")),
        other => panic!("Expected Persistence error, got {other:?}"),
    }
}
