use rusqlite::Connection;
use ticket_office_core::db::migrations::latest_version;
use ticket_office_core::db::{open_db, open_db_in_memory, DbError};
use ticket_office_core::{EntityKind, RecordStore, RepoError, SqliteRecordStore, Station};

#[test]
fn open_db_in_memory_applies_storage_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "collections");
    assert_table_exists(&conn, "documents");
}

#[test]
fn bootstrap_creates_missing_collections() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::bootstrap(conn, &EntityKind::collection_names()).unwrap();

    let mut expected: Vec<String> = EntityKind::collection_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    expected.sort();
    assert_eq!(store.collection_names().unwrap(), expected);
}

#[test]
fn bootstrap_is_idempotent_and_keeps_existing_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("office.sqlite3");

    let store = SqliteRecordStore::bootstrap(open_db(&path).unwrap(), &["Stations"]).unwrap();
    store
        .insert(&Station {
            name: "Central".to_string(),
            railways: 4,
            staff: 12,
            ..Station::default()
        })
        .unwrap();
    drop(store);

    let reopened = SqliteRecordStore::bootstrap(
        open_db(&path).unwrap(),
        &EntityKind::collection_names(),
    )
    .unwrap();
    assert_eq!(reopened.collection_names().unwrap().len(), 5);

    let stations: Vec<Station> = reopened.list().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].name, "Central");
}

#[test]
fn bootstrap_rejects_invalid_collection_names() {
    let conn = open_db_in_memory().unwrap();
    let err = SqliteRecordStore::bootstrap(conn, &["Stations", "bad name"])
        .err()
        .unwrap();
    assert!(matches!(err, RepoError::InvalidCollectionName(name) if name == "bad name"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
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
