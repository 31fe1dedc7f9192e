// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - Forward-compatible: records written by older versions are backfilled
//   with empty-string defaults instead of failing at read time
// - Idempotent operations

use crate::error::{AppError, AppResult};
use rusqlite::Connection;

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Initialize the database schema
///
/// This function:
/// 1. Checks current schema version
/// 2. Applies necessary migrations
/// 3. Updates version tracking
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        // Fresh database - apply full schema
        apply_initial_schema(conn)?;
        set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
    } else if current_version < CURRENT_SCHEMA_VERSION {
        if current_version < 2 {
            backfill_optional_columns(conn)?;
        }
        set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Get current schema version
/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(AppError::Database)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(AppError::Database)?;

    Ok(version.unwrap_or(0))
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(AppError::Database)?;

    Ok(())
}

/// Apply the full current schema (fresh database)
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply schema: {}", e)))?;

    Ok(())
}

/// Version 1 -> 2: add the optional descriptive columns.
///
/// Version 1 catalogs carried only name, purchase data and the derived
/// cost. Records from such a database get empty-string defaults for the
/// newer columns rather than failing on load.
fn backfill_optional_columns(conn: &Connection) -> AppResult<()> {
    let statements = [
        "ALTER TABLE materials ADD COLUMN brand TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE materials ADD COLUMN texture TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE materials ADD COLUMN color TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE materials ADD COLUMN material_type TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE materials ADD COLUMN link TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE materials ADD COLUMN note TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE parts ADD COLUMN specification TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE parts ADD COLUMN link TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE parts ADD COLUMN note TEXT NOT NULL DEFAULT ''",
    ];

    for statement in statements {
        match conn.execute(statement, []) {
            Ok(_) => {}
            // Column already present: a partially-migrated database is fine
            Err(e) if e.to_string().contains("duplicate column name") => {
                log::debug!("Skipping backfill statement, column exists: {}", statement);
            }
            Err(e) => return Err(AppError::Database(e)),
        }
    }

    Ok(())
}
