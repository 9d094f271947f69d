//! # Kitstock Application Library
//!
//! Orchestration and presentation for the kit catalog. The `kitstock`
//! binary (`main.rs`) is a thin shell over this library.
//!
//! ## Module Organization
//! ```text
//! kitstock/
//! ├── lib.rs               ◄─── You are here (logging setup)
//! ├── config.rs            ◄─── Layered AppConfig (defaults, TOML, env)
//! ├── state.rs             ◄─── AppState: explicit service wiring
//! ├── services/
//! │   ├── products.rs      ◄─── ProductsService
//! │   ├── kits.rs          ◄─── KitsService
//! │   └── calculated_kits.rs ◄─ CalculatedKitsService
//! ├── commands/
//! │   ├── product.rs       ◄─── Product DTOs and commands
//! │   └── kit.rs           ◄─── Kit DTOs, commands, calculate_kit
//! ├── cli.rs               ◄─── clap definitions and dispatch
//! └── error.rs             ◄─── ApiError returned by commands
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set (e.g. `RUST_LOG=kitstock_db=trace`)
/// - Otherwise `default_filter`, normally `logging.filter` from the config
///
/// Logs go to stderr; stdout carries command output.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
