//! # Error Types
//!
//! Domain-specific error types for kitstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kitstock-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kitstock-db errors (separate crate)                                   │
//! │  └── DbError          - NotFound, UniqueViolation, storage failures    │
//! │                                                                         │
//! │  App errors                                                            │
//! │  ├── ServiceError     - CoreError | DbError                            │
//! │  └── ApiError         - What the CLI prints (code + message)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never logs or swallows an error: every failure is returned to the
//! immediate caller.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// An entity already carries an identity and cannot be given another.
    ///
    /// ## When This Occurs
    /// - `define_id` called twice on the same Product or Kit
    /// - A repository asked to persist an entity that was already persisted
    ///
    /// This is a programming error; callers should not retry.
    #[error("{entity} already has id {id}")]
    IdentityAlreadyAssigned { entity: String, id: String },

    /// A kit line item references a SKU missing from the supplied products.
    ///
    /// ## User Workflow
    /// ```text
    /// calculate_kit("kit-1")
    ///      │
    ///      ▼
    /// kit lines: [A x2, B x1]    products fetched: [A]
    ///      │
    ///      ▼
    /// MissingLineItemProduct { kit_sku: "PACK-1", product_sku: "B" }
    /// ```
    ///
    /// The caller handed the engine an incomplete product set. Not retried.
    #[error("Kit {kit_sku}: no matching product for kit line item {product_sku}")]
    MissingLineItemProduct { kit_sku: String, product_sku: String },

    /// A product cannot be removed while kits still reference it.
    #[error("Product {sku} is used by {kit_count} kit(s) and cannot be removed")]
    ProductInUse { sku: String, kit_count: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an IdentityAlreadyAssigned error.
    pub fn identity_assigned(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::IdentityAlreadyAssigned {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Raised by the orchestration layer before entities are built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., illegal SKU characters, NaN amounts).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
