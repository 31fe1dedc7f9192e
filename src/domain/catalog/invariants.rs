use super::entity::{Category, Material, Part};
use crate::domain::{costing, DomainError, DomainResult};

// Tolerance when checking that a stored unit cost still matches its inputs.
const UNIT_COST_EPSILON: f64 = 1e-9;

/// Validates all Material invariants
/// These are the absolute rules that must hold for a Material to be persisted
pub fn validate_material(material: &Material) -> DomainResult<()> {
    validate_name(&material.name)?;
    validate_spend(material.purchase_price, material.shipping_cost)?;
    if !(material.total_weight_g > 0.0) || !material.total_weight_g.is_finite() {
        return Err(DomainError::InvalidQuantity {
            basis: material.total_weight_g,
        });
    }
    validate_unit_cost(
        material.purchase_price,
        material.shipping_cost,
        material.total_weight_g,
        material.unit_cost,
    )
}

/// Validates all Part invariants (accessory or packaging)
pub fn validate_part(part: &Part) -> DomainResult<()> {
    if part.category == Category::Material {
        return Err(DomainError::InvariantViolation(
            "Parts must be accessories or packaging".to_string(),
        ));
    }
    validate_name(&part.name)?;
    validate_spend(part.purchase_price, part.shipping_cost)?;
    if part.total_units < 1 {
        return Err(DomainError::InvalidQuantity {
            basis: part.total_units as f64,
        });
    }
    validate_unit_cost(
        part.purchase_price,
        part.shipping_cost,
        part.total_units as f64,
        part.unit_cost,
    )
}

/// Name cannot be empty; it doubles as the record's natural key
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Record name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Monetary inputs must be finite and non-negative
fn validate_spend(purchase_price: f64, shipping_cost: f64) -> DomainResult<()> {
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
    Ok(())
}

/// The stored unit cost must equal (purchase + shipping) / basis
fn validate_unit_cost(
    purchase_price: f64,
    shipping_cost: f64,
    basis: f64,
    stored: f64,
) -> DomainResult<()> {
    let expected = costing::unit_cost(purchase_price, shipping_cost, basis)?;
    if (expected - stored).abs() > UNIT_COST_EPSILON {
        return Err(DomainError::InvariantViolation(format!(
            "Stored unit cost {} is stale; expected {}",
            stored, expected
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the catalog domain:
///
/// 1. Name is non-empty and unique within its category
/// 2. Identity (UUID) is immutable
/// 3. Quantity basis is strictly positive (grams) or at least one (units)
/// 4. unit_cost is always consistent with purchase, shipping and basis
/// 5. A record violating 3 or 4 is never persisted
/// 6. Image token, link and note are optional metadata with no validation
/// 7. Created timestamp never changes; updated reflects last modification

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_material() -> Material {
        Material::new(
            "PLA Matte Black".to_string(),
            "Polymaker".to_string(),
            "matte".to_string(),
            "black".to_string(),
            "PLA".to_string(),
            89.0,
            10.0,
            1000.0,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            0.099,
            None,
            String::new(),
            String::new(),
        )
    }

    fn sample_part(category: Category) -> Part {
        Part::new(
            category,
            "M3 screw".to_string(),
            "M3x8".to_string(),
            30.0,
            3.0,
            100,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            0.33,
            None,
            String::new(),
            String::new(),
        )
    }

    #[test]
    fn test_valid_material() {
        assert!(validate_material(&sample_material()).is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        let mut material = sample_material();
        material.name = "   ".to_string();
        assert!(validate_material(&material).is_err());
    }

    #[test]
    fn test_zero_weight_fails() {
        let mut material = sample_material();
        material.total_weight_g = 0.0;
        assert!(matches!(
            validate_material(&material),
            Err(DomainError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_negative_weight_fails() {
        let mut material = sample_material();
        material.total_weight_g = -5.0;
        assert!(matches!(
            validate_material(&material),
            Err(DomainError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_stale_unit_cost_fails() {
        let mut material = sample_material();
        material.unit_cost = 1.25;
        assert!(validate_material(&material).is_err());
    }

    #[test]
    fn test_valid_part() {
        assert!(validate_part(&sample_part(Category::Accessory)).is_ok());
        assert!(validate_part(&sample_part(Category::Packaging)).is_ok());
    }

    #[test]
    fn test_part_cannot_be_material() {
        let part = sample_part(Category::Material);
        assert!(validate_part(&part).is_err());
    }

    #[test]
    fn test_negative_price_fails() {
        let mut part = sample_part(Category::Accessory);
        part.purchase_price = -1.0;
        assert!(validate_part(&part).is_err());
    }
}
