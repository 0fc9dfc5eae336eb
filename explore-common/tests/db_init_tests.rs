//! Integration tests for database initialization

use explore_common::db;
use tempfile::TempDir;

#[tokio::test]
async fn creates_database_and_parent_directories() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("explore.db");

    let pool = db::init_database(&db_path).await.expect("init should succeed");
    assert!(db_path.exists());

    // Schema is usable immediately
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM item_pages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn init_is_idempotent_on_existing_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("explore.db");

    let pool = db::init_database(&db_path).await.unwrap();
    drop(pool);

    // Second open must not fail or clobber the schema
    let pool = db::init_database(&db_path).await.expect("reopen should succeed");
    db::apply_schema(&pool).await.expect("schema reapply is safe");
}
