// src/repositories/material_repository.rs
//
// Print material persistence

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::catalog::Material;
use crate::error::{AppError, AppResult};

const SELECT_COLUMNS: &str = "id, name, brand, texture, color, material_type, purchase_price,
     shipping_cost, total_weight_g, purchased_on, unit_cost, image_token, link, note,
     created_at, updated_at";

pub trait MaterialRepository: Send + Sync {
    fn save(&self, material: &Material) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Material>>;
    fn get_by_name(&self, name: &str) -> AppResult<Option<Material>>;
    fn list_all(&self) -> AppResult<Vec<Material>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn exists_by_name(&self, name: &str) -> AppResult<bool>;
}

pub struct SqliteMaterialRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMaterialRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Material - returns rusqlite::Error for query_map
    /// compatibility
    fn row_to_material(row: &Row) -> Result<Material, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let purchased_on_str: String = row.get("purchased_on")?;
        let purchased_on = NaiveDate::parse_from_str(&purchased_on_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at = parse_timestamp(&row.get::<_, String>("created_at")?)?;
        let updated_at = parse_timestamp(&row.get::<_, String>("updated_at")?)?;

        Ok(Material {
            id,
            name: row.get("name")?,
            brand: row.get("brand")?,
            texture: row.get("texture")?,
            color: row.get("color")?,
            material_type: row.get("material_type")?,
            purchase_price: row.get("purchase_price")?,
            shipping_cost: row.get("shipping_cost")?,
            total_weight_g: row.get("total_weight_g")?,
            purchased_on,
            unit_cost: row.get("unit_cost")?,
            image_token: row.get("image_token")?,
            link: row.get("link")?,
            note: row.get("note")?,
            created_at,
            updated_at,
        })
    }

    fn query_all(conn: &Connection) -> Result<Vec<Material>, rusqlite::Error> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM materials ORDER BY rowid"
        ))?;

        let materials = stmt
            .query_map([], Self::row_to_material)?
            .collect::<Result<Vec<_>, _>>();
        materials
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl MaterialRepository for SqliteMaterialRepository {
    fn save(&self, material: &Material) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO materials (
                id, name, brand, texture, color, material_type, purchase_price,
                shipping_cost, total_weight_g, purchased_on, unit_cost, image_token,
                link, note, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                material.id.to_string(),
                material.name,
                material.brand,
                material.texture,
                material.color,
                material.material_type,
                material.purchase_price,
                material.shipping_cost,
                material.total_weight_g,
                material.purchased_on.format("%Y-%m-%d").to_string(),
                material.unit_cost,
                material.image_token,
                material.link,
                material.note,
                material.created_at.to_rfc3339(),
                material.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Material>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM materials WHERE id = ?1"
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_material) {
            Ok(material) => Ok(Some(material)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_by_name(&self, name: &str) -> AppResult<Option<Material>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM materials WHERE name = ?1"
        ))?;

        match stmt.query_row(params![name], Self::row_to_material) {
            Ok(material) => Ok(Some(material)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Material>> {
        let conn = self.pool.get()?;

        match Self::query_all(&conn) {
            Ok(materials) => Ok(materials),
            Err(e) => {
                log::warn!("Materials catalog unreadable, serving empty list: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM materials WHERE id = ?1",
            params![id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM materials WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
