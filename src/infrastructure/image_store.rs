// src/infrastructure/image_store.rs
//
// Image storage and association resolution
//
// CRITICAL RULES:
// - One directory per catalog category
// - The catalog services are the sole writer/deleter; the resolver is the
//   sole reader
// - Resolution never fails: an unresolvable token means "no image", which
//   the caller renders as a placeholder

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::catalog::Category;
use crate::error::{AppError, AppResult};

/// Extensions probed by the resolver, in priority order.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// An image payload handed over by the UI boundary.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Name of the file as uploaded; only its extension is kept
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Resolve a stored image token to an existing file in `dir`.
///
/// An empty token, or the literal case-insensitive string "nan" (a
/// numeric-missing-value artifact some serialized catalogs carry), means no
/// image. Otherwise `dir/token.<ext>` is probed for each known extension,
/// then `dir/token` bare. Missing files degrade to None, never an error.
pub fn resolve_image(dir: &Path, token: Option<&str>) -> Option<PathBuf> {
    let token = token?.trim();
    if token.is_empty() || token.eq_ignore_ascii_case("nan") {
        return None;
    }

    for ext in IMAGE_EXTENSIONS {
        let candidate = dir.join(format!("{}.{}", token, ext));
        if candidate.exists() {
            return Some(candidate);
        }
    }

    let bare = dir.join(token);
    if bare.exists() {
        return Some(bare);
    }

    None
}

/// Owns the per-category image directories under one root.
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create the store, ensuring every category directory exists.
    pub fn new(root: PathBuf) -> AppResult<Self> {
        for category in [Category::Material, Category::Accessory, Category::Packaging] {
            fs::create_dir_all(root.join(category.image_dir_name())).map_err(AppError::Io)?;
        }
        Ok(Self { root })
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.image_dir_name())
    }

    /// Persist an uploaded image under a filename derived from the record
    /// name, returning the token to store on the record.
    ///
    /// The upload's extension (if any) is appended to the record name; a
    /// file already present under that name is overwritten.
    pub fn save_upload(
        &self,
        category: Category,
        record_name: &str,
        upload: &ImageUpload,
    ) -> AppResult<String> {
        let mut file_name = record_name.to_string();
        if let Some(ext) = Path::new(&upload.original_name)
            .extension()
            .and_then(|e| e.to_str())
        {
            if !file_name.ends_with(&format!(".{}", ext)) {
                file_name.push('.');
                file_name.push_str(ext);
            }
        }

        let path = self.category_dir(category).join(&file_name);
        fs::write(&path, &upload.bytes).map_err(AppError::Io)?;

        Ok(file_name)
    }

    /// Resolve a record's token against its category directory.
    pub fn resolve(&self, category: Category, token: Option<&str>) -> Option<PathBuf> {
        resolve_image(&self.category_dir(category), token)
    }

    /// Best-effort removal of the file a token resolves to.
    ///
    /// A missing or already-deleted file is not an error; image files are
    /// disposable alongside their catalog record.
    pub fn remove(&self, category: Category, token: Option<&str>) {
        if let Some(path) = self.resolve(category, token) {
            if let Err(e) = fs::remove_file(&path) {
                log::debug!("Could not remove image {:?}: {}", path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_and_nan_tokens_resolve_to_none() {
        let (_dir, store) = store();
        assert!(store.resolve(Category::Material, None).is_none());
        assert!(store.resolve(Category::Material, Some("")).is_none());
        assert!(store.resolve(Category::Material, Some("   ")).is_none());
        assert!(store.resolve(Category::Material, Some("nan")).is_none());
        assert!(store.resolve(Category::Material, Some("NaN")).is_none());
    }

    #[test]
    fn test_extension_probe_order() {
        let (_dir, store) = store();
        let dir = store.category_dir(Category::Accessory);
        fs::write(dir.join("screw.png"), b"png").unwrap();
        fs::write(dir.join("screw.jpg"), b"jpg").unwrap();

        // jpg is probed before png
        let resolved = store.resolve(Category::Accessory, Some("screw")).unwrap();
        assert_eq!(resolved, dir.join("screw.jpg"));
    }

    #[test]
    fn test_bare_filename_fallback() {
        let (_dir, store) = store();
        let dir = store.category_dir(Category::Packaging);
        fs::write(dir.join("box.webp"), b"webp").unwrap();

        // "box.webp" is not found via the extension probes, only bare
        let resolved = store
            .resolve(Category::Packaging, Some("box.webp"))
            .unwrap();
        assert_eq!(resolved, dir.join("box.webp"));
        assert!(store.resolve(Category::Packaging, Some("box")).is_none());
    }

    #[test]
    fn test_missing_file_resolves_to_none() {
        let (_dir, store) = store();
        assert!(store.resolve(Category::Material, Some("ghost")).is_none());
    }

    #[test]
    fn test_save_upload_derives_name_and_overwrites() {
        let (_dir, store) = store();
        let upload = ImageUpload {
            original_name: "photo.jpg".to_string(),
            bytes: vec![1, 2, 3],
        };

        let token = store
            .save_upload(Category::Material, "PLA Matte", &upload)
            .unwrap();
        assert_eq!(token, "PLA Matte.jpg");

        // Same record name overwrites the previous file
        let replacement = ImageUpload {
            original_name: "other.jpg".to_string(),
            bytes: vec![9],
        };
        store
            .save_upload(Category::Material, "PLA Matte", &replacement)
            .unwrap();

        let path = store
            .resolve(Category::Material, Some(token.as_str()))
            .unwrap();
        assert_eq!(fs::read(path).unwrap(), vec![9]);
    }

    #[test]
    fn test_remove_is_best_effort() {
        let (_dir, store) = store();
        // Removing a token with no file behind it does not panic or error
        store.remove(Category::Material, Some("ghost"));
        store.remove(Category::Material, None);

        let upload = ImageUpload {
            original_name: "p.png".to_string(),
            bytes: vec![1],
        };
        let token = store.save_upload(Category::Material, "PLA", &upload).unwrap();
        store.remove(Category::Material, Some(token.as_str()));
        assert!(store.resolve(Category::Material, Some(token.as_str())).is_none());
    }
}
