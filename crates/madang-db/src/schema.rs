//! # Schema
//!
//! The embedded three-table schema.
//!
//! ## How Schema Creation Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Creation                                    │
//! │                                                                         │
//! │  Database::new                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_schema(pool) ── CREATE TABLE IF NOT EXISTS Customer/Book/Orders │
//! │       │                                                                 │
//! │       ├── fresh file?  ──► bootstrap::load_seed (CSV bulk load)        │
//! │       │                                                                 │
//! │       └── existing file ──► no-op (tables already there)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no migration history table: the persisted schema is exactly
//! `Customer`, `Book` and `Orders` (plus two lookup indexes).

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// The schema, embedded at compile time from `sql/schema.sql`.
pub const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");

/// Names of the tables this application owns, in dependency order.
pub const TABLES: [&str; 3] = ["Customer", "Book", "Orders"];

/// Creates any missing tables and indexes.
///
/// Idempotent: every statement is `IF NOT EXISTS`.
pub async fn apply_schema(pool: &SqlitePool) -> DbResult<()> {
    debug!("Applying schema");

    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;

    info!(tables = ?TABLES, "Schema ready");
    Ok(())
}

/// Lists the user tables present in the database, sorted by name.
///
/// ## Usage
/// For diagnostics and tests.
pub async fn table_names(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}
