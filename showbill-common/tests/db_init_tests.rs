//! Tests for database initialization
//!
//! Covers automatic creation, idempotent re-initialization, and the
//! connection pragmas the directory relies on.

use showbill_common::db::init_database;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("showbill.db");

    assert!(!db_path.exists());

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());

    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("showbill.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());
    drop(pool1);

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_idempotent_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("showbill.db");

    let pool1 = init_database(&db_path).await.unwrap();
    drop(pool1);

    // Second initialization must not error or disturb the schema
    let pool = init_database(&db_path).await.unwrap();

    for table in ["venues", "artists", "shows"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "Table '{}' not empty after re-initialization", table);
    }
}

#[tokio::test]
async fn test_foreign_keys_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("showbill.db")).await.unwrap();

    let fk_enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(fk_enabled, 1, "Foreign keys should be enabled");
}

#[tokio::test]
async fn test_busy_timeout_set() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("showbill.db")).await.unwrap();

    let timeout: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(timeout, 5000, "Busy timeout should be 5000ms");
}

#[tokio::test]
async fn test_show_uniqueness_covers_start_time() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("showbill.db")).await.unwrap();

    // The uniqueness constraint covers the full (venue, artist, start_time)
    // triple, not just the pair
    let table_sql: String = sqlx::query_scalar(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'shows'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(
        table_sql.contains("UNIQUE (venue_id, artist_id, start_time)"),
        "shows uniqueness constraint missing or wrong: {}",
        table_sql
    );
}
