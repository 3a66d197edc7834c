use habitgrid_core::db::migrations::latest_version;
use habitgrid_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "habits");
    assert_table_exists(&conn, "logs");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitgrid.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "habits");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unique_habit_name_is_enforced_by_schema() {
    let conn = open_db_in_memory().unwrap();

    conn.execute("INSERT INTO habits (name) VALUES ('Read');", [])
        .unwrap();
    let err = conn
        .execute("INSERT INTO habits (name) VALUES ('Read');", [])
        .unwrap_err();
    assert!(err.to_string().contains("UNIQUE"));
}

#[test]
fn unique_habit_day_pair_is_enforced_by_schema() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO logs (habit_id, log_date, status) VALUES (1, '2024-06-03', 1);",
        [],
    )
    .unwrap();
    let err = conn
        .execute(
            "INSERT INTO logs (habit_id, log_date, status) VALUES (1, '2024-06-03', 2);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("UNIQUE"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
