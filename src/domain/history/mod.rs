// src/domain/history/mod.rs
//
// History domain: one archived pricing computation.
//
// Entries are append-only. They are never edited after creation; the only
// destructive operation the ledger supports is a full clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::costing::CostBreakdown;

/// A completed cost aggregation, flattened for the ledger.
///
/// Selected names are stored comma-joined: the ledger is a flat historical
/// log, not a normalized relation, and the names are display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Internal immutable identifier
    pub id: Uuid,

    /// When the computation was archived
    pub recorded_at: DateTime<Utc>,

    pub weight_g: f64,

    pub material_name: String,

    pub material_cost: f64,

    /// Comma-joined accessory names, empty when none were selected
    pub accessory_names: String,

    pub accessories_cost: f64,

    /// Comma-joined packaging names, empty when none were selected
    pub packaging_names: String,

    pub packaging_cost: f64,

    pub total_cost: f64,
}

impl HistoryEntry {
    /// Project a breakdown into a ledger entry, stamped now.
    pub fn from_breakdown(breakdown: &CostBreakdown) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            weight_g: breakdown.weight_g,
            material_name: breakdown.material_name.clone(),
            material_cost: breakdown.material_cost,
            accessory_names: breakdown.accessory_names.join(","),
            accessories_cost: breakdown.accessories_cost,
            packaging_names: breakdown.packaging_names.join(","),
            packaging_cost: breakdown.packaging_cost,
            total_cost: breakdown.total_cost,
        }
    }
}
