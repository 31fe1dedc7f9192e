// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod history_service;
pub mod material_service;
pub mod part_service;
pub mod pricing_service;


// Re-export all services and their types
pub use material_service::{MaterialDraft, MaterialService};

pub use part_service::{PartDraft, PartService};

pub use pricing_service::{PricingRequest, PricingService};

pub use history_service::HistoryService;
