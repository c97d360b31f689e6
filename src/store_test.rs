use super::*;
use serde_json::json;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("session-guard-{}.json", uuid::Uuid::new_v4()))
}

// =============================================================================
// MemoryStore
// =============================================================================

#[test]
fn memory_store_missing_key_is_none() {
    let store = MemoryStore::new();
    assert!(store.get("user").unwrap().is_none());
}

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    store.set("user", json!({ "token": "abc" })).unwrap();
    assert_eq!(store.get("user").unwrap(), Some(json!({ "token": "abc" })));

    store.remove("user").unwrap();
    assert!(store.get("user").unwrap().is_none());
}

#[test]
fn memory_store_remove_missing_is_ok() {
    let store = MemoryStore::new();
    assert!(store.remove("user").is_ok());
}

// =============================================================================
// FileStore
// =============================================================================

#[test]
fn file_store_missing_file_reads_empty() {
    let store = FileStore::new(temp_path());
    assert!(store.get("user").unwrap().is_none());
}

#[test]
fn file_store_persists_across_instances() {
    let path = temp_path();
    FileStore::new(&path).set("user", json!({ "token": "abc123" })).unwrap();
    FileStore::new(&path).set("theme", json!("dark")).unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("user").unwrap(), Some(json!({ "token": "abc123" })));
    assert_eq!(reopened.get("theme").unwrap(), Some(json!("dark")));

    reopened.remove("user").unwrap();
    assert!(FileStore::new(&path).get("user").unwrap().is_none());
    assert_eq!(FileStore::new(&path).get("theme").unwrap(), Some(json!("dark")));

    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_rejects_non_object_file() {
    let path = temp_path();
    std::fs::write(&path, "[1, 2]").unwrap();

    let err = FileStore::new(&path).get("user").unwrap_err();
    assert_eq!(err.error_code(), "E_STORE_CORRUPT");
    assert!(err.to_string().contains("an array"));

    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_blank_file_reads_empty() {
    let path = temp_path();
    std::fs::write(&path, "\n").unwrap();
    assert!(FileStore::new(&path).get("user").unwrap().is_none());
    let _ = std::fs::remove_file(path);
}
