// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod costing;
pub mod history;
pub mod selection;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Catalog Domain
pub use catalog::{validate_material, validate_part, Category, Material, Part};

// Costing Domain
pub use costing::{compute_breakdown, unit_cost, BreakdownLine, CostBreakdown, RateUnit};

// Selection Domain
pub use selection::SelectionState;

// History Domain (Derived Data)
pub use history::HistoryEntry;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Quantity basis {basis} must be positive")]
    InvalidQuantity { basis: f64 },

    #[error("A record named '{0}' already exists in this catalog")]
    DuplicateName(String),

    #[error("No print material selected")]
    MissingSelection,
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
