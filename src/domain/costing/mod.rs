// src/domain/costing/mod.rs
//
// Costing domain: pure cost arithmetic.
//
// CRITICAL RULES:
// - No I/O. Repositories and services fetch; this module only computes.
// - unit_cost is the single place the derived per-gram/per-unit cost is
//   produced; catalog records never carry a hand-edited value.
// - compute_breakdown does not write history; the caller records results.

use serde::{Deserialize, Serialize};

use super::catalog::{Material, Part};
use super::{DomainError, DomainResult};

/// Derive a unit cost from acquisition inputs.
///
/// `basis` is total grams for materials and total units for parts; the
/// formula is identical for both. Fails rather than letting a zero or
/// negative basis propagate NaN/Infinity into a persisted record.
pub fn unit_cost(purchase_price: f64, shipping_cost: f64, basis: f64) -> DomainResult<f64> {
    if !basis.is_finite() || basis <= 0.0 {
        return Err(DomainError::InvalidQuantity { basis });
    }
    if !purchase_price.is_finite() || purchase_price < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Purchase price {} must be a non-negative amount",
            purchase_price
        )));
    }
    if !shipping_cost.is_finite() || shipping_cost < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Shipping cost {} must be a non-negative amount",
            shipping_cost
        )));
    }
    Ok((purchase_price + shipping_cost) / basis)
}

/// Unit the rate of a breakdown line is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    PerGram,
    PerUnit,
}

/// One row of the human-readable itemization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub name: String,
    pub rate: f64,
    pub unit: RateUnit,
    pub amount: f64,
}

impl std::fmt::Display for BreakdownLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            RateUnit::PerGram => write!(
                f,
                "{}: {:.4}/g = {:.2}",
                self.name, self.rate, self.amount
            ),
            RateUnit::PerUnit => write!(f, "{}: {:.2}/unit", self.name, self.rate),
        }
    }
}

/// Result of one aggregation: per-category costs, the total, and the inputs
/// that produced it. Ephemeral; projected into a HistoryEntry when the
/// caller archives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub weight_g: f64,
    pub material_name: String,
    pub material_cost: f64,
    pub accessory_names: Vec<String>,
    pub accessories_cost: f64,
    pub packaging_names: Vec<String>,
    pub packaging_cost: f64,
    pub total_cost: f64,
    pub lines: Vec<BreakdownLine>,
}

/// Combine a weight, one material, and the selected part sets into a total
/// cost plus an itemized breakdown.
///
/// Weight zero is valid and yields a zero material cost. Each selected part
/// contributes its full per-unit cost exactly once.
pub fn compute_breakdown(
    weight_g: f64,
    material: &Material,
    accessories: &[Part],
    packaging: &[Part],
) -> DomainResult<CostBreakdown> {
    if !weight_g.is_finite() || weight_g < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Weight {} must be a non-negative number of grams",
            weight_g
        )));
    }

    let material_cost = weight_g * material.unit_cost;
    let mut lines = vec![BreakdownLine {
        name: material.name.clone(),
        rate: material.unit_cost,
        unit: RateUnit::PerGram,
        amount: material_cost,
    }];

    let accessories_cost = sum_parts(accessories, &mut lines);
    let packaging_cost = sum_parts(packaging, &mut lines);
    let total_cost = material_cost + accessories_cost + packaging_cost;

    Ok(CostBreakdown {
        weight_g,
        material_name: material.name.clone(),
        material_cost,
        accessory_names: accessories.iter().map(|p| p.name.clone()).collect(),
        accessories_cost,
        packaging_names: packaging.iter().map(|p| p.name.clone()).collect(),
        packaging_cost,
        total_cost,
        lines,
    })
}

fn sum_parts(parts: &[Part], lines: &mut Vec<BreakdownLine>) -> f64 {
    let mut sum = 0.0;
    for part in parts {
        sum += part.unit_cost;
        lines.push(BreakdownLine {
            name: part.name.clone(),
            rate: part.unit_cost,
            unit: RateUnit::PerUnit,
            amount: part.unit_cost,
        });
    }
    sum
}
