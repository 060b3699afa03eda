//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL string
//! that transforms the schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema version {} is newer than supported version {}",
            current, CURRENT_VERSION
        )));
    }

    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version) VALUES (?1)",
                rusqlite::params![version],
            )?;
            tracing::info!(version, "applied registry schema migration");
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Data source records, keyed by allocated id
        CREATE TABLE data_sources (
            id INTEGER PRIMARY KEY,           -- DataSourceId
            record BLOB NOT NULL              -- canonical CBOR encoding
        );

        -- Named u64 counters (sequence allocator, bridge heights)
        CREATE TABLE cells (
            name TEXT PRIMARY KEY,
            value INTEGER NOT NULL
        );

        -- Registry parameters, one row per ParamKey
        CREATE TABLE params (
            key TEXT PRIMARY KEY,
            value INTEGER NOT NULL
        );

        -- Single-row chain metadata
        CREATE TABLE chain (
            id INTEGER PRIMARY KEY CHECK (id = 0),
            chain_id TEXT NOT NULL
        );
        "#,
    )?;

    Ok(())
}
