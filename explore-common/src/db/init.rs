//! Database initialization
//!
//! Creates the editorial database on first run and applies the schema
//! idempotently on every start.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while the editorial surface writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    apply_schema(&pool).await?;

    Ok(pool)
}

/// Apply the schema (idempotent, safe to call multiple times)
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    // Override pages: locally authored notes keyed by entity identifier
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS item_pages (
            qid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '[]',
            featured_pids TEXT,
            published INTEGER NOT NULL DEFAULT 0,
            first_published_at TEXT
        )",
    )
    .execute(pool)
    .await?;

    // Class feature mappings: class Qid -> ordered featured property list
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS class_mappings (
            class_qid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            featured_pids TEXT NOT NULL DEFAULT '[]'
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS articles (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '[]',
            date TEXT NOT NULL,
            category TEXT,
            published INTEGER NOT NULL DEFAULT 0,
            first_published_at TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS article_tags (
            article_guid TEXT NOT NULL REFERENCES articles(guid) ON DELETE CASCADE,
            tag TEXT NOT NULL,
            PRIMARY KEY (article_guid, tag)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS categories (
            slug TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            intro TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await?;

    // Single-row site record
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS homepage (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            link TEXT NOT NULL DEFAULT '',
            intro TEXT NOT NULL DEFAULT '',
            intro_articles TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
