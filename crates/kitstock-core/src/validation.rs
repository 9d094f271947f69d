//! # Validation Module
//!
//! Input validation utilities for Kitstock.
//!
//! Entities and the calculation engine never validate their inputs; the
//! services call these functions before building or updating an entity.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / command DTOs                                           │
//! │  └── Type validation (clap / serde parsing)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services                                                     │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE constraints on SKUs                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kitstock_core::validation::{validate_sku, validate_line_quantity};
//!
//! assert!(validate_sku("PS5-PAD").is_ok());
//! assert!(validate_line_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{KitLineItem, ProductDetails, ProductUpdate};
use crate::{MAX_DISCOUNT_PERCENTAGE, MAX_NAME_LENGTH, MAX_SKU_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens, underscores
///
/// ## Example
/// ```rust
/// use kitstock_core::validation::validate_sku;
///
/// assert!(validate_sku("AHJU-49685").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.chars().count() > MAX_SKU_LENGTH {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LENGTH,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or kit name (non-empty, at most 200 characters).
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cost or price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is allowed for free items)
///
/// ## Example
/// ```rust
/// use kitstock_core::validation::validate_amount;
///
/// assert!(validate_amount("price", 10.99).is_ok());
/// assert!(validate_amount("price", 0.0).is_ok());
/// assert!(validate_amount("price", -1.0).is_err());
/// assert!(validate_amount("price", f64::NAN).is_err());
/// ```
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates the per-kit quantity of a line item (must be positive).
pub fn validate_line_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item discount (finite, 0 to 100 inclusive).
pub fn validate_discount_percentage(discount_percentage: f64) -> ValidationResult<()> {
    if !discount_percentage.is_finite()
        || !(0.0..=MAX_DISCOUNT_PERCENTAGE).contains(&discount_percentage)
    {
        return Err(ValidationError::OutOfRange {
            field: "discount_percentage".to_string(),
            min: 0.0,
            max: MAX_DISCOUNT_PERCENTAGE,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a new product.
pub fn validate_product_details(details: &ProductDetails) -> ValidationResult<()> {
    validate_name(&details.name)?;
    validate_sku(&details.sku)?;
    validate_amount("cost", details.cost)?;
    validate_amount("price", details.price)?;
    Ok(())
}

/// Validates every field of a product update.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    validate_name(&update.name)?;
    validate_amount("cost", update.cost)?;
    validate_amount("price", update.price)?;
    Ok(())
}

/// Validates a kit's line items.
///
/// ## Rules
/// - At least one line item
/// - Each line: valid SKU, positive quantity, discount within 0-100
pub fn validate_line_items(line_items: &[KitLineItem]) -> ValidationResult<()> {
    if line_items.is_empty() {
        return Err(ValidationError::Required {
            field: "line_items".to_string(),
        });
    }

    for item in line_items {
        validate_sku(item.product_sku())?;
        validate_line_quantity(item.quantity())?;
        validate_discount_percentage(item.discount_percentage())?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("AHJU-49685").is_ok());
        assert!(validate_sku("ABC123").is_ok());
        assert!(validate_sku("product_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("The Last of Us Part II").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("cost", 0.0).is_ok());
        assert!(validate_amount("cost", 220.0).is_ok());
        assert_eq!(
            validate_amount("cost", -0.01),
            Err(ValidationError::MustNotBeNegative {
                field: "cost".to_string()
            })
        );
        assert!(validate_amount("cost", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_discount_percentage() {
        assert!(validate_discount_percentage(0.0).is_ok());
        assert!(validate_discount_percentage(15.0).is_ok());
        assert!(validate_discount_percentage(100.0).is_ok());
        assert!(validate_discount_percentage(100.5).is_err());
        assert!(validate_discount_percentage(-1.0).is_err());
        assert!(validate_discount_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_line_items() {
        assert_eq!(
            validate_line_items(&[]),
            Err(ValidationError::Required {
                field: "line_items".to_string()
            })
        );
        assert!(validate_line_items(&[KitLineItem::new("AHJU-49685", 1, 10.0)]).is_ok());
        assert!(validate_line_items(&[KitLineItem::new("AHJU-49685", 0, 10.0)]).is_err());
        assert!(validate_line_items(&[KitLineItem::new("AHJU 49685", 1, 10.0)]).is_err());
    }

    #[test]
    fn test_validate_product_details() {
        let mut details = ProductDetails {
            name: "The Last of Us Part II".to_string(),
            sku: "AHJU-49685".to_string(),
            cost: 10.0,
            price: 220.0,
            inventory_quantity: 150,
        };
        assert!(validate_product_details(&details).is_ok());

        details.price = -220.0;
        assert!(matches!(
            validate_product_details(&details),
            Err(ValidationError::MustNotBeNegative { field }) if field == "price"
        ));
    }
}
