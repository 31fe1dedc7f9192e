// src/domain/catalog/mod.rs
//
// Catalog domain: the three ingredient categories a priced product is
// assembled from. Materials are costed per gram; accessories and packaging
// are costed per discrete unit.

mod entity;
mod invariants;

pub use entity::{Category, Material, Part};
pub use invariants::{validate_material, validate_part};
