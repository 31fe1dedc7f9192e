// src/services/pricing_service.rs
//
// Cost aggregation: turns a weight, one chosen material and the selection
// sets into a CostBreakdown. Reads the catalogs; writes nothing. Archiving
// the result is the caller's explicit step via HistoryService.

use std::sync::Arc;

use crate::domain::catalog::{Category, Part};
use crate::domain::costing::{self, CostBreakdown};
use crate::domain::{DomainError, SelectionState};
use crate::error::{AppError, AppResult};
use crate::repositories::{MaterialRepository, PartRepository};

/// Inputs for one pricing run.
#[derive(Debug, Clone)]
pub struct PricingRequest {
    /// Product weight in grams; zero is valid
    pub weight_g: f64,
    /// Name of the chosen print material; None fails with MissingSelection
    pub material_name: Option<String>,
}

pub struct PricingService {
    materials: Arc<dyn MaterialRepository>,
    accessories: Arc<dyn PartRepository>,
    packaging: Arc<dyn PartRepository>,
}

impl PricingService {
    pub fn new(
        materials: Arc<dyn MaterialRepository>,
        accessories: Arc<dyn PartRepository>,
        packaging: Arc<dyn PartRepository>,
    ) -> Self {
        Self {
            materials,
            accessories,
            packaging,
        }
    }

    /// Price a product from the request and the session's selection sets.
    ///
    /// Selected names that no longer exist in their catalog are skipped;
    /// the selection outlives catalog edits and must not poison a later
    /// computation.
    pub fn price(
        &self,
        request: &PricingRequest,
        selection: &SelectionState,
    ) -> AppResult<CostBreakdown> {
        let material_name = request
            .material_name
            .as_deref()
            .ok_or(AppError::Domain(DomainError::MissingSelection))?;

        let material = self
            .materials
            .get_by_name(material_name)?
            .ok_or(AppError::NotFound)?;

        let accessories =
            self.fetch_selected(self.accessories.as_ref(), selection, Category::Accessory)?;
        let packaging =
            self.fetch_selected(self.packaging.as_ref(), selection, Category::Packaging)?;

        let breakdown = costing::compute_breakdown(
            request.weight_g,
            &material,
            &accessories,
            &packaging,
        )?;

        Ok(breakdown)
    }

    fn fetch_selected(
        &self,
        repo: &dyn PartRepository,
        selection: &SelectionState,
        category: Category,
    ) -> AppResult<Vec<Part>> {
        let mut parts = Vec::new();
        for name in selection.current(category) {
            match repo.get_by_name(&name)? {
                Some(part) => parts.push(part),
                None => {
                    log::debug!("Skipping stale {} selection '{}'", category, name);
                }
            }
        }
        Ok(parts)
    }
}
