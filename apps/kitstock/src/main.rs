//! # Kitstock CLI Entry Point
//!
//! ## Startup Sequence
//! ```text
//! 1. Parse arguments (clap)
//! 2. Load configuration (defaults → kitstock.toml / --config → KITSTOCK_* env)
//! 3. Initialize logging
//! 4. Connect to SQLite, run pending migrations
//! 5. Wire AppState, execute the command
//! 6. Print JSON: result on stdout (exit 0) or ApiError on stderr (exit 1)
//! ```

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use kitstock::cli::{self, Cli};
use kitstock::{init_tracing, AppConfig, AppState};
use kitstock_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.logging.filter);

    info!(path = %config.database.path.display(), "Starting kitstock");

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;
    let state = AppState::new(&db);

    let outcome = cli::execute(&state, cli.command).await;
    db.close().await;

    match outcome {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
