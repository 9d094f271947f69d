//! Error type returned by every command.
//!
//! ```text
//! CoreError ─┐
//!            ├─► ServiceError ─► ApiError { code, message } ─► JSON on stderr
//! DbError  ──┘
//! ```
//!
//! Not found, duplicate, validation and product-in-use errors keep their
//! message. Storage failures are logged with their details and reported with
//! a generic message.

use kitstock_core::CoreError;
use kitstock_db::DbError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::ServiceError;

/// `{ "code": "DUPLICATE_KEY", "message": "sku 'AHJU-49685' already exists" }`
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product or kit id/SKU, including a line item SKU with no product.
    NotFound,
    ValidationError,
    /// SKU already taken.
    DuplicateKey,
    /// Product still referenced by at least one kit.
    ProductInUse,
    /// Storage failed; details are in the log only.
    DatabaseError,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Logs `detail` and hides it behind `summary`.
    fn storage_failure(summary: &str, detail: &dyn std::fmt::Display) -> Self {
        error!(error = %detail, "{}", summary);
        ApiError::new(ErrorCode::DatabaseError, summary)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::DuplicateKey,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::Domain(e) => e.into(),
            DbError::ForeignKeyViolation { message } => {
                error!(error = %message, "Line item references a missing product");
                ApiError::validation("Invalid product reference")
            }
            DbError::Unidentified { entity } => {
                error!(entity = %entity, "Entity without id reached storage");
                ApiError::internal(format!("{} has no id", entity))
            }
            DbError::ConnectionFailed(e) => {
                ApiError::storage_failure("Database connection failed", &e)
            }
            DbError::MigrationFailed(e) => {
                ApiError::storage_failure("Database migration failed", &e)
            }
            DbError::PoolExhausted => {
                ApiError::storage_failure("Database pool exhausted", &"all connections busy")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                ApiError::storage_failure("Database operation failed", &e)
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductInUse { .. } => ErrorCode::ProductInUse,
            CoreError::MissingLineItemProduct { .. } => ErrorCode::NotFound,
            CoreError::Validation(e) => return ApiError::validation(e.to_string()),
            CoreError::IdentityAlreadyAssigned { .. } => {
                error!(error = %err, "Identity reassigned");
                ErrorCode::Internal
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => e.into(),
            ServiceError::Db(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitstock_core::ValidationError;

    #[test]
    fn test_serializes_screaming_snake_case_code() {
        let err = ApiError::new(ErrorCode::ProductInUse, "busy");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json, serde_json::json!({ "code": "PRODUCT_IN_USE", "message": "busy" }));
    }

    #[test]
    fn test_db_error_mapping() {
        let err = ApiError::from(DbError::duplicate("sku", "AHJU-49685"));
        assert_eq!(err.code, ErrorCode::DuplicateKey);
        assert_eq!(err.message, "sku 'AHJU-49685' already exists");

        let err = ApiError::from(DbError::not_found("Kit", "42"));
        assert_eq!(err, ApiError::not_found("Kit", "42"));

        let err = ApiError::from(DbError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::ProductInUse {
            sku: "AHJU-49685".to_string(),
            kit_count: 2,
        });
        assert_eq!(err.code, ErrorCode::ProductInUse);

        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = ApiError::from(DbError::Domain(CoreError::MissingLineItemProduct {
            kit_sku: "FASF-123".to_string(),
            product_sku: "AHJU-49621".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
