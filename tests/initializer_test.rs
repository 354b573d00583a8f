//! Integration tests for the connection initializer.

#![allow(clippy::expect_used)]

use authdb::storage::{AUTH_TABLES, CURRENT_SCHEMA_VERSION, DEFAULT_DB_DIR, DEFAULT_DB_NAME};
use authdb::{DatabaseConfig, StorageLocation, initialize_in};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

/// Helper to build a config from literal environment pairs.
fn config_from(pairs: &[(&str, &str)]) -> DatabaseConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    DatabaseConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn test_default_location_created() {
    // override unset, dev_db absent
    let temp = TempDir::new().expect("temp dir");
    assert!(!temp.path().join(DEFAULT_DB_DIR).exists());

    let db = initialize_in(&config_from(&[]), temp.path()).expect("initialize failed");

    let expected = temp.path().join(DEFAULT_DB_DIR).join(DEFAULT_DB_NAME);
    assert_eq!(db.location().path(), expected.as_path());
    assert!(expected.is_file());
    assert!(!db.logging_enabled());
    db.close().expect("close failed");
}

#[test]
fn test_override_creates_nested_directory() {
    let temp = TempDir::new().expect("temp dir");
    let target = temp.path().join("mydb").join("x.db");
    let url = target.to_str().expect("utf-8 temp path");

    let db = initialize_in(&config_from(&[("DATABASE_URL", url)]), temp.path())
        .expect("initialize failed");

    assert!(temp.path().join("mydb").is_dir());
    assert!(target.is_file());
    assert_eq!(db.location().path(), target.as_path());
    assert!(!temp.path().join(DEFAULT_DB_DIR).exists());
}

#[test]
fn test_whitespace_override_falls_back_to_default() {
    let temp = TempDir::new().expect("temp dir");

    let db = initialize_in(&config_from(&[("DATABASE_URL", "   ")]), temp.path())
        .expect("initialize failed");

    assert_eq!(
        db.location(),
        &StorageLocation::default_in(temp.path())
    );
    assert!(temp.path().join("dev_db/auth.db").is_file());
}

#[test]
fn test_logging_flag_from_config() {
    let temp = TempDir::new().expect("temp dir");

    for (value, expected) in [("true", true), ("false", false), ("True", false), ("1", false)] {
        let config = config_from(&[("DATABASE_URL", ":memory:"), ("DATABASE_LOGGING", value)]);
        let db = initialize_in(&config, temp.path()).expect("initialize failed");
        assert_eq!(db.logging_enabled(), expected, "DATABASE_LOGGING={value}");
    }

    let config = config_from(&[("DATABASE_URL", ":memory:")]);
    let db = initialize_in(&config, temp.path()).expect("initialize failed");
    assert!(!db.logging_enabled());
}

#[test]
fn test_directory_failure_returns_no_handle() {
    // A regular file occupies the directory path.
    let temp = TempDir::new().expect("temp dir");
    std::fs::write(temp.path().join(DEFAULT_DB_DIR), b"occupied").expect("write blocker");

    let err = initialize_in(&config_from(&[]), temp.path()).expect_err("should fail");
    assert!(err.is_directory_error(), "{err}");
    assert!(err.to_string().contains(DEFAULT_DB_DIR));
}

#[cfg(unix)]
#[test]
fn test_directory_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().expect("temp dir");
    let locked = temp.path().join("locked");
    std::fs::create_dir(&locked).expect("create locked dir");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o500))
        .expect("chmod");

    // Root ignores directory permissions; nothing to assert there.
    if std::fs::create_dir(locked.join("probe")).is_ok() {
        return;
    }

    let target = locked.join("dev_db").join("auth.db");
    let url = target.to_str().expect("utf-8 temp path");
    let err = initialize_in(&config_from(&[("DATABASE_URL", url)]), temp.path())
        .expect_err("should fail");
    assert!(err.is_directory_error(), "{err}");

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o700))
        .expect("restore permissions");
}

#[test]
fn test_corrupt_file_fails_to_open() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join(DEFAULT_DB_DIR);
    std::fs::create_dir(&dir).expect("create dir");
    std::fs::write(dir.join(DEFAULT_DB_NAME), "this is not a sqlite database".repeat(200))
        .expect("write garbage");

    let err = initialize_in(&config_from(&[]), temp.path()).expect_err("should fail");
    assert!(err.is_open_error(), "{err}");
}

#[test]
fn test_reinitialize_preserves_data() {
    let temp = TempDir::new().expect("temp dir");

    let db = initialize_in(&config_from(&[]), temp.path()).expect("first init");
    db.create_tables().expect("create tables");
    db.execute(
        "INSERT INTO user (id, name, email, created_at, updated_at) VALUES ('u1', 'Ada', 'ada@example.com', 0, 0)",
        [],
    )
    .expect("insert");
    db.close().expect("close");

    let db = initialize_in(&config_from(&[]), temp.path()).expect("second init");
    assert_eq!(db.row_count("user").expect("count"), Some(1));
    assert_eq!(
        db.schema_version().expect("version"),
        Some(CURRENT_SCHEMA_VERSION)
    );
    for table in AUTH_TABLES {
        assert!(db.table_exists(table.name).expect("table_exists"));
    }
}

#[test]
fn test_existing_tables_of_other_shape_are_left_alone() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join(DEFAULT_DB_DIR);
    std::fs::create_dir(&dir).expect("create dir");
    let path = dir.join(DEFAULT_DB_NAME);
    {
        let conn = Connection::open(&path).expect("seed open");
        conn.execute_batch(
            "CREATE TABLE session (id TEXT PRIMARY KEY, userId TEXT);
             INSERT INTO session (id, userId) VALUES ('s1', 'u1');",
        )
        .expect("seed");
    }

    let db = initialize_in(&config_from(&[]), temp.path()).expect("initialize failed");

    let user: String = db
        .query_row("SELECT userId FROM session WHERE id = ?1", ["s1"], |row| {
            row.get(0)
        })
        .expect("query");
    assert_eq!(user, "u1");
    assert_eq!(db.tables().expect("tables"), vec!["session"]);
    assert_eq!(db.schema_version().expect("version"), None);
}

#[test]
fn test_initialize_keeps_default_journal_mode() {
    let temp = TempDir::new().expect("temp dir");

    let db = initialize_in(&config_from(&[]), temp.path()).expect("initialize failed");
    let path = db.location().path().to_path_buf();
    db.close().expect("close");

    let conn = Connection::open(&path).expect("reopen");
    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .expect("journal_mode");
    assert_eq!(mode, "delete");
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .expect("table count");
    assert_eq!(tables, 0);
}

#[test]
fn test_storage_location_uses_working_directory() {
    let cwd = std::env::current_dir().expect("cwd");
    let location = DatabaseConfig::default().storage_location();
    assert_eq!(
        location.path(),
        cwd.join(Path::new(DEFAULT_DB_DIR)).join(DEFAULT_DB_NAME)
    );
}
