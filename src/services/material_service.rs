// src/services/material_service.rs
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{validate_material, Category, Material};
use crate::domain::{costing, DomainError};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{ImageStore, ImageUpload};
use crate::repositories::MaterialRepository;

/// Full editable field set for a material. Create and update both take the
/// whole draft; the derived unit cost is recomputed from it on every write.
#[derive(Debug, Clone)]
pub struct MaterialDraft {
    pub name: String,
    pub brand: String,
    pub texture: String,
    pub color: String,
    pub material_type: String,
    pub purchase_price: f64,
    pub shipping_cost: f64,
    pub total_weight_g: f64,
    pub purchased_on: NaiveDate,
    pub link: String,
    pub note: String,
}

pub struct MaterialService {
    repo: Arc<dyn MaterialRepository>,
    images: Arc<ImageStore>,
}

impl MaterialService {
    pub fn new(repo: Arc<dyn MaterialRepository>, images: Arc<ImageStore>) -> Self {
        Self { repo, images }
    }

    /// Add a material to the catalog.
    ///
    /// Duplicate names are rejected: the name doubles as the selection key,
    /// so two records sharing one would make lookups ambiguous.
    pub fn create_material(
        &self,
        draft: MaterialDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<Uuid> {
        let unit_cost = costing::unit_cost(
            draft.purchase_price,
            draft.shipping_cost,
            draft.total_weight_g,
        )?;

        if self.repo.exists_by_name(&draft.name)? {
            return Err(AppError::Domain(DomainError::DuplicateName(draft.name)));
        }

        let mut material = Material::new(
            draft.name,
            draft.brand,
            draft.texture,
            draft.color,
            draft.material_type,
            draft.purchase_price,
            draft.shipping_cost,
            draft.total_weight_g,
            draft.purchased_on,
            unit_cost,
            None,
            draft.link,
            draft.note,
        );

        validate_material(&material).map_err(AppError::Domain)?;

        // Image lands on disk only once the record itself is valid
        if let Some(upload) = image {
            material.image_token = Some(self.images.save_upload(
                Category::Material,
                &material.name,
                &upload,
            )?);
        }

        self.repo.save(&material)?;

        Ok(material.id)
    }

    /// Replace a material's fields, recomputing the unit cost.
    ///
    /// A supplied image replaces the stored token; otherwise the previous
    /// token is retained.
    pub fn update_material(
        &self,
        material_id: Uuid,
        draft: MaterialDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<()> {
        let mut material = self
            .repo
            .get_by_id(material_id)?
            .ok_or(AppError::NotFound)?;

        let unit_cost = costing::unit_cost(
            draft.purchase_price,
            draft.shipping_cost,
            draft.total_weight_g,
        )?;

        // Renaming onto another record's name is the same ambiguity as a
        // duplicate add
        if draft.name != material.name && self.repo.exists_by_name(&draft.name)? {
            return Err(AppError::Domain(DomainError::DuplicateName(draft.name)));
        }

        material.name = draft.name;
        material.brand = draft.brand;
        material.texture = draft.texture;
        material.color = draft.color;
        material.material_type = draft.material_type;
        material.purchase_price = draft.purchase_price;
        material.shipping_cost = draft.shipping_cost;
        material.total_weight_g = draft.total_weight_g;
        material.purchased_on = draft.purchased_on;
        material.unit_cost = unit_cost;
        material.link = draft.link;
        material.note = draft.note;
        material.updated_at = Utc::now();

        validate_material(&material).map_err(AppError::Domain)?;

        // A new image replaces the stored token; otherwise keep the old one
        if let Some(upload) = image {
            material.image_token = Some(self.images.save_upload(
                Category::Material,
                &material.name,
                &upload,
            )?);
        }

        self.repo.save(&material)?;

        Ok(())
    }

    /// Remove a material and, best-effort, its image file.
    pub fn delete_material(&self, material_id: Uuid) -> AppResult<()> {
        let material = self
            .repo
            .get_by_id(material_id)?
            .ok_or(AppError::NotFound)?;

        self.repo.delete(material_id)?;
        self.images
            .remove(Category::Material, material.image_token.as_deref());

        Ok(())
    }

    pub fn get_material(&self, material_id: Uuid) -> AppResult<Option<Material>> {
        self.repo.get_by_id(material_id)
    }

    pub fn list_materials(&self) -> AppResult<Vec<Material>> {
        self.repo.list_all()
    }

    /// Path to a material's image, if its token resolves to a file.
    pub fn material_image(&self, material: &Material) -> Option<std::path::PathBuf> {
        self.images
            .resolve(Category::Material, material.image_token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool, initialize_database};
    use crate::repositories::SqliteMaterialRepository;

    fn service() -> (tempfile::TempDir, MaterialService) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("printcost.db")).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        let repo = Arc::new(SqliteMaterialRepository::new(Arc::new(pool)));
        let images = Arc::new(ImageStore::new(dir.path().join("images")).unwrap());
        (dir, MaterialService::new(repo, images))
    }

    fn draft(name: &str, weight: f64) -> MaterialDraft {
        MaterialDraft {
            name: name.to_string(),
            brand: "Polymaker".to_string(),
            texture: "matte".to_string(),
            color: "black".to_string(),
            material_type: "PLA".to_string(),
            purchase_price: 89.0,
            shipping_cost: 10.0,
            total_weight_g: weight,
            purchased_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            link: String::new(),
            note: String::new(),
        }
    }

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            original_name: name.to_string(),
            bytes: vec![0xFF, 0xD8],
        }
    }

    #[test]
    fn test_create_derives_unit_cost() {
        let (_dir, service) = service();
        service.create_material(draft("PLA", 1000.0), None).unwrap();

        let materials = service.list_materials().unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].unit_cost, 0.099);
    }

    #[test]
    fn test_create_rejects_zero_weight() {
        let (_dir, service) = service();
        let result = service.create_material(draft("PLA", 0.0), None);
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidQuantity { .. }))
        ));
        assert!(service.list_materials().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let (_dir, service) = service();
        assert!(service.create_material(draft("  ", 1000.0), None).is_err());
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let (_dir, service) = service();
        service.create_material(draft("PLA", 1000.0), None).unwrap();

        let result = service.create_material(draft("PLA", 500.0), None);
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::DuplicateName(_)))
        ));
        assert_eq!(service.list_materials().unwrap().len(), 1);
    }

    #[test]
    fn test_update_recomputes_unit_cost() {
        let (_dir, service) = service();
        let id = service.create_material(draft("PLA", 1000.0), None).unwrap();

        service
            .update_material(id, draft("PLA", 500.0), None)
            .unwrap();

        let material = service.get_material(id).unwrap().unwrap();
        assert_eq!(material.unit_cost, 0.198);
    }

    #[test]
    fn test_update_rejects_zero_weight() {
        let (_dir, service) = service();
        let id = service.create_material(draft("PLA", 1000.0), None).unwrap();

        let result = service.update_material(id, draft("PLA", 0.0), None);
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidQuantity { .. }))
        ));

        // Record is untouched
        let material = service.get_material(id).unwrap().unwrap();
        assert_eq!(material.total_weight_g, 1000.0);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (_dir, service) = service();
        let result = service.update_material(Uuid::new_v4(), draft("PLA", 1000.0), None);
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_update_retains_image_when_none_supplied() {
        let (_dir, service) = service();
        let id = service
            .create_material(draft("PLA", 1000.0), Some(upload("spool.jpg")))
            .unwrap();

        service
            .update_material(id, draft("PLA", 500.0), None)
            .unwrap();

        let material = service.get_material(id).unwrap().unwrap();
        assert_eq!(material.image_token.as_deref(), Some("PLA.jpg"));
        assert!(service.material_image(&material).is_some());
    }

    #[test]
    fn test_update_replaces_image_when_supplied() {
        let (_dir, service) = service();
        let id = service
            .create_material(draft("PLA", 1000.0), Some(upload("spool.jpg")))
            .unwrap();

        service
            .update_material(id, draft("PLA", 500.0), Some(upload("new.png")))
            .unwrap();

        let material = service.get_material(id).unwrap().unwrap();
        assert_eq!(material.image_token.as_deref(), Some("PLA.png"));
    }

    #[test]
    fn test_delete_removes_record_and_image() {
        let (_dir, service) = service();
        let id = service
            .create_material(draft("PLA", 1000.0), Some(upload("spool.jpg")))
            .unwrap();
        let material = service.get_material(id).unwrap().unwrap();

        service.delete_material(id).unwrap();

        assert!(service.get_material(id).unwrap().is_none());
        assert!(service.material_image(&material).is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let (_dir, service) = service();
        assert!(matches!(
            service.delete_material(Uuid::new_v4()),
            Err(AppError::NotFound)
        ));
    }
}
