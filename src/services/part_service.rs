// src/services/part_service.rs
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{validate_part, Category, Part};
use crate::domain::{costing, DomainError};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{ImageStore, ImageUpload};
use crate::repositories::PartRepository;

/// Full editable field set for an accessory or packaging item.
#[derive(Debug, Clone)]
pub struct PartDraft {
    pub name: String,
    pub specification: String,
    pub purchase_price: f64,
    pub shipping_cost: f64,
    pub total_units: u32,
    pub purchased_on: NaiveDate,
    pub link: String,
    pub note: String,
}

/// Orchestrates one part catalog. Instantiated twice, once per category,
/// over a repository already bound to that category.
pub struct PartService {
    repo: Arc<dyn PartRepository>,
    images: Arc<ImageStore>,
}

impl PartService {
    pub fn new(repo: Arc<dyn PartRepository>, images: Arc<ImageStore>) -> Self {
        Self { repo, images }
    }

    pub fn category(&self) -> Category {
        self.repo.category()
    }

    /// Add a part to this category's catalog. Duplicate names within the
    /// category are rejected.
    pub fn create_part(&self, draft: PartDraft, image: Option<ImageUpload>) -> AppResult<Uuid> {
        let unit_cost = costing::unit_cost(
            draft.purchase_price,
            draft.shipping_cost,
            draft.total_units as f64,
        )?;

        if self.repo.exists_by_name(&draft.name)? {
            return Err(AppError::Domain(DomainError::DuplicateName(draft.name)));
        }

        let mut part = Part::new(
            self.category(),
            draft.name,
            draft.specification,
            draft.purchase_price,
            draft.shipping_cost,
            draft.total_units,
            draft.purchased_on,
            unit_cost,
            None,
            draft.link,
            draft.note,
        );

        validate_part(&part).map_err(AppError::Domain)?;

        if let Some(upload) = image {
            part.image_token =
                Some(self.images.save_upload(self.category(), &part.name, &upload)?);
        }

        self.repo.save(&part)?;

        Ok(part.id)
    }

    /// Replace a part's fields, recomputing the unit cost. A supplied image
    /// replaces the stored token; otherwise the previous token is retained.
    pub fn update_part(
        &self,
        part_id: Uuid,
        draft: PartDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<()> {
        let mut part = self.repo.get_by_id(part_id)?.ok_or(AppError::NotFound)?;

        let unit_cost = costing::unit_cost(
            draft.purchase_price,
            draft.shipping_cost,
            draft.total_units as f64,
        )?;

        if draft.name != part.name && self.repo.exists_by_name(&draft.name)? {
            return Err(AppError::Domain(DomainError::DuplicateName(draft.name)));
        }

        part.name = draft.name;
        part.specification = draft.specification;
        part.purchase_price = draft.purchase_price;
        part.shipping_cost = draft.shipping_cost;
        part.total_units = draft.total_units;
        part.purchased_on = draft.purchased_on;
        part.unit_cost = unit_cost;
        part.link = draft.link;
        part.note = draft.note;
        part.updated_at = Utc::now();

        validate_part(&part).map_err(AppError::Domain)?;

        if let Some(upload) = image {
            part.image_token =
                Some(self.images.save_upload(self.category(), &part.name, &upload)?);
        }

        self.repo.save(&part)?;

        Ok(())
    }

    /// Remove a part and, best-effort, its image file.
    pub fn delete_part(&self, part_id: Uuid) -> AppResult<()> {
        let part = self.repo.get_by_id(part_id)?.ok_or(AppError::NotFound)?;

        self.repo.delete(part_id)?;
        self.images
            .remove(self.category(), part.image_token.as_deref());

        Ok(())
    }

    pub fn get_part(&self, part_id: Uuid) -> AppResult<Option<Part>> {
        self.repo.get_by_id(part_id)
    }

    pub fn list_parts(&self) -> AppResult<Vec<Part>> {
        self.repo.list_all()
    }

    /// Path to a part's image, if its token resolves to a file.
    pub fn part_image(&self, part: &Part) -> Option<std::path::PathBuf> {
        self.images
            .resolve(self.category(), part.image_token.as_deref())
    }
}
