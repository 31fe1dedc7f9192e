// src/repositories/part_repository.rs
//
// Accessory/packaging persistence
//
// Both part categories live in one table tagged by category; a repository
// instance is bound to exactly one category at construction, so the two
// catalogs stay independent at the API surface.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::material_repository::parse_timestamp;
use crate::db::ConnectionPool;
use crate::domain::catalog::{Category, Part};
use crate::error::{AppError, AppResult};

const SELECT_COLUMNS: &str = "id, category, name, specification, purchase_price, shipping_cost,
     total_units, purchased_on, unit_cost, image_token, link, note, created_at, updated_at";

pub trait PartRepository: Send + Sync {
    /// The category this instance is bound to.
    fn category(&self) -> Category;
    fn save(&self, part: &Part) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Part>>;
    fn get_by_name(&self, name: &str) -> AppResult<Option<Part>>;
    fn list_all(&self) -> AppResult<Vec<Part>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn exists_by_name(&self, name: &str) -> AppResult<bool>;
}

pub struct SqlitePartRepository {
    pool: Arc<ConnectionPool>,
    category: Category,
}

impl SqlitePartRepository {
    /// `category` must be Accessory or Packaging; the materials catalog has
    /// its own repository.
    pub fn new(pool: Arc<ConnectionPool>, category: Category) -> Self {
        debug_assert!(category != Category::Material);
        Self { pool, category }
    }

    fn row_to_part(row: &Row) -> Result<Part, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let category_str: String = row.get("category")?;
        let category = match category_str.as_str() {
            "accessory" => Category::Accessory,
            "packaging" => Category::Packaging,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let purchased_on_str: String = row.get("purchased_on")?;
        let purchased_on = NaiveDate::parse_from_str(&purchased_on_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let total_units: i64 = row.get("total_units")?;

        Ok(Part {
            id,
            category,
            name: row.get("name")?,
            specification: row.get("specification")?,
            purchase_price: row.get("purchase_price")?,
            shipping_cost: row.get("shipping_cost")?,
            total_units: total_units as u32,
            purchased_on,
            unit_cost: row.get("unit_cost")?,
            image_token: row.get("image_token")?,
            link: row.get("link")?,
            note: row.get("note")?,
            created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
            updated_at: parse_timestamp(&row.get::<_, String>("updated_at")?)?,
        })
    }

    fn query_all(conn: &Connection, category: Category) -> Result<Vec<Part>, rusqlite::Error> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM parts WHERE category = ?1 ORDER BY rowid"
        ))?;

        let parts = stmt
            .query_map(params![category.to_string()], Self::row_to_part)?
            .collect::<Result<Vec<_>, _>>();
        parts
    }
}

impl PartRepository for SqlitePartRepository {
    fn category(&self) -> Category {
        self.category
    }

    fn save(&self, part: &Part) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO parts (
                id, category, name, specification, purchase_price, shipping_cost,
                total_units, purchased_on, unit_cost, image_token, link, note,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                part.id.to_string(),
                part.category.to_string(),
                part.name,
                part.specification,
                part.purchase_price,
                part.shipping_cost,
                part.total_units as i64,
                part.purchased_on.format("%Y-%m-%d").to_string(),
                part.unit_cost,
                part.image_token,
                part.link,
                part.note,
                part.created_at.to_rfc3339(),
                part.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Part>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM parts WHERE id = ?1 AND category = ?2"
        ))?;

        match stmt.query_row(
            params![id.to_string(), self.category.to_string()],
            Self::row_to_part,
        ) {
            Ok(part) => Ok(Some(part)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_by_name(&self, name: &str) -> AppResult<Option<Part>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM parts WHERE name = ?1 AND category = ?2"
        ))?;

        match stmt.query_row(
            params![name, self.category.to_string()],
            Self::row_to_part,
        ) {
            Ok(part) => Ok(Some(part)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Part>> {
        let conn = self.pool.get()?;

        match Self::query_all(&conn, self.category) {
            Ok(parts) => Ok(parts),
            Err(e) => {
                log::warn!(
                    "{} catalog unreadable, serving empty list: {}",
                    self.category,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM parts WHERE id = ?1 AND category = ?2",
            params![id.to_string(), self.category.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM parts WHERE name = ?1 AND category = ?2",
            params![name, self.category.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool, initialize_database};

    fn test_pool() -> (tempfile::TempDir, Arc<ConnectionPool>) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("printcost.db")).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        (dir, Arc::new(pool))
    }

    fn part(category: Category, name: &str) -> Part {
        Part::new(
            category,
            name.to_string(),
            "M3x8".to_string(),
            30.0,
            3.0,
            100,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            0.33,
            None,
            String::new(),
            String::new(),
        )
    }

    #[test]
    fn test_save_and_roundtrip() {
        let (_dir, pool) = test_pool();
        let repo = SqlitePartRepository::new(pool, Category::Accessory);

        let p = part(Category::Accessory, "Screw");
        repo.save(&p).unwrap();

        let loaded = repo.get_by_name("Screw").unwrap().unwrap();
        assert_eq!(loaded.id, p.id);
        assert_eq!(loaded.specification, "M3x8");
        assert_eq!(loaded.total_units, 100);
        assert_eq!(loaded.unit_cost, 0.33);
    }

    #[test]
    fn test_categories_do_not_leak_across_instances() {
        let (_dir, pool) = test_pool();
        let accessories = SqlitePartRepository::new(pool.clone(), Category::Accessory);
        let packaging = SqlitePartRepository::new(pool, Category::Packaging);

        // Same name in both categories is allowed; each instance sees only
        // its own record
        accessories.save(&part(Category::Accessory, "Box")).unwrap();
        packaging.save(&part(Category::Packaging, "Box")).unwrap();

        assert_eq!(accessories.list_all().unwrap().len(), 1);
        assert_eq!(packaging.list_all().unwrap().len(), 1);

        let acc = accessories.get_by_name("Box").unwrap().unwrap();
        assert_eq!(acc.category, Category::Accessory);

        // Deleting from one category leaves the other intact
        accessories.delete(acc.id).unwrap();
        assert!(accessories.get_by_name("Box").unwrap().is_none());
        assert!(packaging.get_by_name("Box").unwrap().is_some());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, pool) = test_pool();
        let repo = SqlitePartRepository::new(pool, Category::Packaging);
        assert!(matches!(
            repo.delete(Uuid::new_v4()),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let (_dir, pool) = test_pool();
        let repo = SqlitePartRepository::new(pool, Category::Packaging);
        repo.save(&part(Category::Packaging, "Wrap")).unwrap();
        repo.save(&part(Category::Packaging, "Bag")).unwrap();

        let names: Vec<String> = repo.list_all().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Wrap", "Bag"]);
    }
}
