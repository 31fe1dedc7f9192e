// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only
//
// One deviation from the usual "errors always propagate" rule: list reads
// over corrupt or unreadable storage degrade to an empty sequence with a
// warning. The user can always re-add data; a broken file must never make
// the catalogs unusable.

pub mod history_repository;
pub mod material_repository;
pub mod part_repository;

pub use history_repository::{HistoryRepository, SqliteHistoryRepository};
pub use material_repository::{MaterialRepository, SqliteMaterialRepository};
pub use part_repository::{PartRepository, SqlitePartRepository};
