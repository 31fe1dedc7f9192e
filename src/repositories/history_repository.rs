// src/repositories/history_repository.rs
//
// Pricing history persistence
//
// The ledger is append-only: entries are inserted, listed in insertion
// order, or wiped wholesale. There is no update path.

use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::material_repository::parse_timestamp;
use crate::db::ConnectionPool;
use crate::domain::history::HistoryEntry;
use crate::error::{AppError, AppResult};

pub trait HistoryRepository: Send + Sync {
    fn append(&self, entry: &HistoryEntry) -> AppResult<()>;
    fn list_all(&self) -> AppResult<Vec<HistoryEntry>>;
    fn clear(&self) -> AppResult<()>;
}

pub struct SqliteHistoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteHistoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &Row) -> Result<HistoryEntry, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(HistoryEntry {
            id,
            recorded_at: parse_timestamp(&row.get::<_, String>("recorded_at")?)?,
            weight_g: row.get("weight_g")?,
            material_name: row.get("material_name")?,
            material_cost: row.get("material_cost")?,
            accessory_names: row.get("accessory_names")?,
            accessories_cost: row.get("accessories_cost")?,
            packaging_names: row.get("packaging_names")?,
            packaging_cost: row.get("packaging_cost")?,
            total_cost: row.get("total_cost")?,
        })
    }

    fn query_all(conn: &Connection) -> Result<Vec<HistoryEntry>, rusqlite::Error> {
        let mut stmt = conn.prepare(
            "SELECT id, recorded_at, weight_g, material_name, material_cost,
                    accessory_names, accessories_cost, packaging_names,
                    packaging_cost, total_cost
             FROM history
             ORDER BY rowid",
        )?;

        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>();
        entries
    }
}

impl HistoryRepository for SqliteHistoryRepository {
    fn append(&self, entry: &HistoryEntry) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO history (
                id, recorded_at, weight_g, material_name, material_cost,
                accessory_names, accessories_cost, packaging_names,
                packaging_cost, total_cost
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entry.id.to_string(),
                entry.recorded_at.to_rfc3339(),
                entry.weight_g,
                entry.material_name,
                entry.material_cost,
                entry.accessory_names,
                entry.accessories_cost,
                entry.packaging_names,
                entry.packaging_cost,
                entry.total_cost,
            ],
        )?;

        Ok(())
    }

    fn list_all(&self) -> AppResult<Vec<HistoryEntry>> {
        let conn = self.pool.get()?;

        match Self::query_all(&conn) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!("History ledger unreadable, serving empty list: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn clear(&self) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM history", [])
            .map_err(AppError::Database)?;
        Ok(())
    }
}
