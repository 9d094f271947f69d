//! # Application State
//!
//! Explicit dependency wiring: repositories are built once and handed to the
//! services that need them. Commands receive `&AppState`; there are no
//! globals.
//!
//! ```text
//! Database ──► Arc<dyn ProductRepository> ──┬──► ProductsService
//!          │                                ├──► KitsService
//!          └─► Arc<dyn KitRepository> ──────┴──► CalculatedKitsService
//! ```

use std::sync::Arc;

use kitstock_db::{Database, KitRepository, ProductRepository};

use crate::services::{CalculatedKitsService, KitsService, ProductsService};

/// Services shared by all commands.
#[derive(Clone)]
pub struct AppState {
    products: ProductsService,
    kits: KitsService,
    calculated_kits: CalculatedKitsService,
}

impl AppState {
    /// Wires the SQLite repositories of `db`.
    pub fn new(db: &Database) -> Self {
        AppState::from_repositories(Arc::new(db.products()), Arc::new(db.kits()))
    }

    /// Wires arbitrary repository implementations (tests use the in-memory ones).
    pub fn from_repositories(
        products: Arc<dyn ProductRepository>,
        kits: Arc<dyn KitRepository>,
    ) -> Self {
        AppState {
            products: ProductsService::new(products.clone(), kits.clone()),
            kits: KitsService::new(kits.clone(), products.clone()),
            calculated_kits: CalculatedKitsService::new(kits, products),
        }
    }

    pub fn products(&self) -> &ProductsService {
        &self.products
    }

    pub fn kits(&self) -> &KitsService {
        &self.kits
    }

    pub fn calculated_kits(&self) -> &CalculatedKitsService {
        &self.calculated_kits
    }
}
