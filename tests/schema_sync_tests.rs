//! Integration tests for additive schema sync.
//!
//! These exercise the full connect-and-sync flow plus the additive
//! guarantees: missing tables and columns are created, existing columns and
//! data are never touched.

use chrono::Utc;
use dbkit::db::migrations::{existing_columns, sync_schemas};
use dbkit::db::pool::create_pool;
use dbkit::models::Record;
use dbkit::{ColumnDef, ColumnType, Database, DatabaseConfig, SchemaRegistry, TableDef};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

fn temp_database() -> (TempDir, DatabaseConfig) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    (dir, DatabaseConfig::new(url))
}

fn user_table() -> TableDef {
    TableDef::with_base_columns("user")
        .column(ColumnDef::new("email", ColumnType::Text).unique())
}

#[tokio::test]
async fn test_connect_creates_registered_tables() {
    let (_dir, config) = temp_database();
    let mut registry = SchemaRegistry::new();
    registry.register(user_table());

    let db = Database::connect(config, registry)
        .await
        .expect("failed to connect");

    let columns = existing_columns(db.pool(), "user")
        .await
        .expect("failed to introspect");
    assert_eq!(
        columns,
        vec!["id", "created_at", "updated_at", "deleted_at", "email"]
    );

    // The soft-delete column gets a secondary index
    let index_count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_user_deleted_at'",
    )
    .fetch_one(db.pool())
    .await
    .expect("failed to query sqlite_master");
    assert_eq!(index_count.0, 1);

    db.close().await;
}

#[tokio::test]
async fn test_empty_registry_is_noop() {
    let (_dir, config) = temp_database();

    let db = Database::connect(config, SchemaRegistry::new())
        .await
        .expect("failed to connect");

    let table_count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch_one(db.pool())
    .await
    .expect("failed to query sqlite_master");
    assert_eq!(table_count.0, 0, "no tables should be created");

    db.close().await;
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let (_dir, config) = temp_database();
    let mut registry = SchemaRegistry::new();
    registry.register(user_table());

    let db = Database::connect(config, registry)
        .await
        .expect("failed to connect");

    let schema_before: Vec<(String,)> =
        sqlx::query_as("SELECT sql FROM sqlite_master WHERE name = 'user'")
            .fetch_all(db.pool())
            .await
            .expect("failed to read schema");

    db.sync_schemas().await.expect("second sync failed");

    let schema_after: Vec<(String,)> =
        sqlx::query_as("SELECT sql FROM sqlite_master WHERE name = 'user'")
            .fetch_all(db.pool())
            .await
            .expect("failed to read schema");

    assert_eq!(schema_before, schema_after, "second sync must change nothing");

    db.close().await;
}

#[tokio::test]
async fn test_sync_preserves_unknown_columns_and_data() {
    let (_dir, config) = temp_database();
    let pool = create_pool(&config).await.expect("failed to create pool");

    // Pre-existing table with a column the registry does not know about
    sqlx::query("CREATE TABLE user (id INTEGER PRIMARY KEY AUTOINCREMENT, legacy TEXT)")
        .execute(&pool)
        .await
        .expect("failed to pre-create table");
    sqlx::query("INSERT INTO user (legacy) VALUES ('keep me')")
        .execute(&pool)
        .await
        .expect("failed to insert");

    let mut registry = SchemaRegistry::new();
    registry.register(user_table());
    sync_schemas(&pool, &registry).await.expect("sync failed");

    let columns = existing_columns(&pool, "user")
        .await
        .expect("failed to introspect");
    assert!(
        columns.iter().any(|c| c == "legacy"),
        "unknown column must survive sync"
    );
    assert!(
        columns.iter().any(|c| c == "email"),
        "missing registered column must be added"
    );

    let legacy: (String,) = sqlx::query_as("SELECT legacy FROM user WHERE id = 1")
        .fetch_one(&pool)
        .await
        .expect("failed to read preserved row");
    assert_eq!(legacy.0, "keep me");
}

#[tokio::test]
async fn test_sync_adds_columns_to_populated_table() {
    let (_dir, config) = temp_database();
    let pool = create_pool(&config).await.expect("failed to create pool");

    let v1 = TableDef::with_base_columns("note");
    let mut registry = SchemaRegistry::new();
    registry.register(v1);
    sync_schemas(&pool, &registry).await.expect("v1 sync failed");

    sqlx::query("INSERT INTO note DEFAULT VALUES")
        .execute(&pool)
        .await
        .expect("failed to insert");

    let v2 = TableDef::with_base_columns("note")
        .column(ColumnDef::new("title", ColumnType::Text).default_value("''"));
    let mut registry = SchemaRegistry::new();
    registry.register(v2);
    sync_schemas(&pool, &registry).await.expect("v2 sync failed");

    let title: (String,) = sqlx::query_as("SELECT title FROM note WHERE id = 1")
        .fetch_one(&pool)
        .await
        .expect("added column should be readable on existing rows");
    assert_eq!(title.0, "");
}

#[tokio::test]
async fn test_duplicate_registration_is_tolerated() {
    let (_dir, config) = temp_database();
    let mut registry = SchemaRegistry::new();
    registry.register(user_table());
    registry.register(user_table());

    let db = Database::connect(config, registry)
        .await
        .expect("duplicate registrations must not fail the sync");

    let table_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'user'")
            .fetch_one(db.pool())
            .await
            .expect("failed to query sqlite_master");
    assert_eq!(table_count.0, 1);

    db.close().await;
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
struct User {
    #[sqlx(flatten)]
    #[serde(flatten)]
    base: Record,
    email: String,
}

#[tokio::test]
async fn test_scenario_round_trip_with_base_fields() {
    let (_dir, config) = temp_database();
    let mut registry = SchemaRegistry::new();
    registry.register(user_table());

    let db = Database::connect(config, registry)
        .await
        .expect("failed to connect");

    let now = Utc::now();
    sqlx::query("INSERT INTO user (created_at, updated_at, email) VALUES (?1, ?2, ?3)")
        .bind(now)
        .bind(now)
        .bind("user@example.com")
        .execute(db.pool())
        .await
        .expect("failed to insert user");

    let user: User = sqlx::query_as(
        "SELECT id, created_at, updated_at, deleted_at, email FROM user WHERE email = ?1",
    )
    .bind("user@example.com")
    .fetch_one(db.pool())
    .await
    .expect("failed to fetch user");

    assert_eq!(user.base.id, 1);
    assert_eq!(user.email, "user@example.com");
    assert!(!user.base.is_deleted());

    db.close().await;
}
