// src/lib.rs
// PrintCost - Local-first product costing for small print shops
//
// Architecture:
// - Domain-centric: cost arithmetic and invariants live in `domain`, free
//   of I/O
// - Repositories: dumb SQLite data mappers behind traits
// - Services: orchestration (validation, derived-cost recomputation, image
//   persistence, aggregation, history recording)
// - Local-first: one interactive user per data directory; every operation
//   runs to completion synchronously
//
// Control flow for one pricing run: load the catalogs, toggle selections
// into a SelectionState, call PricingService::price, then hand the
// breakdown to HistoryService::record.

pub mod db;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    compute_breakdown,
    unit_cost,
    validate_material,
    validate_part,
    BreakdownLine,
    // Catalog
    Category,
    // Costing
    CostBreakdown,
    DomainError,
    // History
    HistoryEntry,
    Material,
    Part,
    RateUnit,
    // Selection
    SelectionState,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Services & Infrastructure
// ============================================================================

pub use infrastructure::{resolve_image, ImageStore, ImageUpload};

pub use services::{
    HistoryService, MaterialDraft, MaterialService, PartDraft, PartService, PricingRequest,
    PricingService,
};
