//! # kitstock-db: Repository Layer for Kitstock
//!
//! Repository contracts for products and kits, plus their backends: SQLite
//! (sqlx, async) for real use and `Vec`-backed in-memory stores for tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kitstock Data Flow                               │
//! │                                                                         │
//! │  Service (ProductsService, KitsService, CalculatedKitsService)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   kitstock-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐  ┌──────────────┐ │   │
//! │  │   │   Database    │    │   Repositories    │  │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │   (repository/)   │  │  (embedded)  │ │   │
//! │  │   │               │    │                   │  │              │ │   │
//! │  │   │ SqlitePool    │◄───│ SqliteProductRepo │  │ 001_initial_ │ │   │
//! │  │   │ Connection    │    │ SqliteKitRepo     │  │  schema.sql  │ │   │
//! │  │   │ Management    │    │ InMemory* (tests) │  │              │ │   │
//! │  │   └───────────────┘    └───────────────────┘  └──────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (./kitstock.db by default)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository traits and implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kitstock_db::{Database, DbConfig, ProductRepository};
//!
//! let db = Database::new(DbConfig::new("./kitstock.db")).await?;
//!
//! let id = db.products().add(&product).await?;
//! let kits = db.kits().list_by_product("AHJU-49685").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::kit::SqliteKitRepository;
pub use repository::product::SqliteProductRepository;
pub use repository::{KitRepository, ProductRepository};

#[cfg(any(test, feature = "test-util"))]
pub use repository::memory::{InMemoryKitRepository, InMemoryProductRepository};
