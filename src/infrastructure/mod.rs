// src/infrastructure/mod.rs
//
// Infrastructure: filesystem concerns that sit outside the catalogs.

pub mod image_store;

pub use image_store::{resolve_image, ImageStore, ImageUpload};
