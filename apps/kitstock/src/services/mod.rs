//! # Services
//!
//! Orchestration between repositories and the catalog rules in
//! `kitstock-core`. Services own no storage; they hold the repository trait
//! objects they were built with (see [`crate::state::AppState`]).
//!
//! ```text
//! ProductsService        create / list / get / update / remove (blocked while in a kit)
//! KitsService            create / list / get / update / remove (line items must name products)
//! CalculatedKitsService  calculate_kit(id) → CalculatedKit
//! ```

use kitstock_core::{CoreError, ValidationError};
use kitstock_db::DbError;
use thiserror::Error;

pub mod calculated_kits;
pub mod kits;
pub mod products;

pub use calculated_kits::CalculatedKitsService;
pub use kits::KitsService;
pub use products::ProductsService;

/// Failure of a service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

impl ServiceError {
    /// Checks if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Db(e) if e.is_not_found())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
