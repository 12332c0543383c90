//! Additive schema sync.
//!
//! Reconciles the database against the registered table definitions: missing
//! tables are created, missing columns are added, missing indexes are
//! created. Existing columns are never altered or dropped, so the pass is
//! idempotent and safe to run on every startup.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::schema::{SchemaRegistry, TableDef};

/// Applies the additive sync pass for every registered table, in
/// registration order
///
/// An empty registry is a no-op. Duplicate registrations are tolerated:
/// the second pass over the same definition finds nothing left to add.
///
/// # Errors
///
/// Returns [`DbError::Migration`] naming the first table whose DDL failed.
/// Columns added to a pre-existing table carry fewer constraints than
/// freshly created ones (see [`ColumnDef`](crate::schema::ColumnDef)):
/// SQLite cannot retrofit UNIQUE or non-constant defaults via ALTER.
pub async fn sync_schemas(pool: &SqlitePool, registry: &SchemaRegistry) -> DbResult<()> {
    if registry.is_empty() {
        debug!("schema registry is empty, nothing to sync");
        return Ok(());
    }

    info!(tables = registry.len(), "starting schema sync");

    for table in registry.tables() {
        sync_table(pool, table).await.map_err(|source| {
            warn!(table = %table.name, error = %source, "schema sync failed");
            DbError::Migration {
                table: table.name.clone(),
                source,
            }
        })?;
    }

    info!("schema sync completed");
    Ok(())
}

async fn sync_table(pool: &SqlitePool, table: &TableDef) -> Result<(), sqlx::Error> {
    sqlx::query(&table.create_sql()).execute(pool).await?;

    let existing = existing_columns(pool, &table.name).await?;
    for col in &table.columns {
        if !existing.iter().any(|name| name == &col.name) {
            debug!(table = %table.name, column = %col.name, "adding missing column");
            sqlx::query(&table.add_column_sql(col)).execute(pool).await?;
        }
    }

    for col in table.columns.iter().filter(|c| c.indexed) {
        sqlx::query(&table.create_index_sql(col))
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Names of the columns currently present on a table
///
/// Returns an empty list for a table that does not exist.
pub async fn existing_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1)")
        .bind(table)
        .fetch_all(pool)
        .await
}
