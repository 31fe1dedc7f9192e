use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ingredient category a catalog record belongs to.
///
/// Each category owns its records exclusively; nothing is shared or
/// referenced across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Material,
    Accessory,
    Packaging,
}

impl Category {
    /// Subdirectory name for this category's image files.
    pub fn image_dir_name(&self) -> &'static str {
        match self {
            Category::Material => "materials",
            Category::Accessory => "accessories",
            Category::Packaging => "packaging",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Material => write!(f, "material"),
            Category::Accessory => write!(f, "accessory"),
            Category::Packaging => write!(f, "packaging"),
        }
    }
}

/// A print material, costed per gram of filament/resin.
///
/// `unit_cost` is derived from the purchase data and is recomputed by the
/// service layer on every create/update; it is never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display name; also the natural key used for selection
    pub name: String,

    /// Manufacturer brand
    pub brand: String,

    /// Surface texture (matte, silk, ...)
    pub texture: String,

    /// Filament color
    pub color: String,

    /// Material type (PLA, PETG, resin, ...)
    pub material_type: String,

    /// Purchase price paid for the spool/bottle
    pub purchase_price: f64,

    /// Shipping cost of that purchase
    pub shipping_cost: f64,

    /// Total weight bought, in grams. Quantity basis for the unit cost.
    pub total_weight_g: f64,

    /// Purchase date
    pub purchased_on: NaiveDate,

    /// Derived cost per gram
    pub unit_cost: f64,

    /// Token resolved against the category image directory; None means no
    /// image was ever uploaded
    pub image_token: Option<String>,

    /// Purchase or product link
    pub link: String,

    /// Free-form note
    pub note: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Material {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        brand: String,
        texture: String,
        color: String,
        material_type: String,
        purchase_price: f64,
        shipping_cost: f64,
        total_weight_g: f64,
        purchased_on: NaiveDate,
        unit_cost: f64,
        image_token: Option<String>,
        link: String,
        note: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            brand,
            texture,
            color,
            material_type,
            purchase_price,
            shipping_cost,
            total_weight_g,
            purchased_on,
            unit_cost,
            image_token,
            link,
            note,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An accessory or packaging item, costed per discrete unit.
///
/// The two categories share a shape and differ only in their `category`
/// tag; each is stored and selected independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Accessory or Packaging (never Material)
    pub category: Category,

    /// Display name; natural key within the category
    pub name: String,

    /// Free-form specification (size, grade, ...)
    pub specification: String,

    pub purchase_price: f64,

    pub shipping_cost: f64,

    /// Number of units bought. Quantity basis for the unit cost.
    pub total_units: u32,

    pub purchased_on: NaiveDate,

    /// Derived cost per unit
    pub unit_cost: f64,

    pub image_token: Option<String>,

    pub link: String,

    pub note: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Part {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        category: Category,
        name: String,
        specification: String,
        purchase_price: f64,
        shipping_cost: f64,
        total_units: u32,
        purchased_on: NaiveDate,
        unit_cost: f64,
        image_token: Option<String>,
        link: String,
        note: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category,
            name,
            specification,
            purchase_price,
            shipping_cost,
            total_units,
            purchased_on,
            unit_cost,
            image_token,
            link,
            note,
            created_at: now,
            updated_at: now,
        }
    }
}
