//! Application configuration.
//!
//! Layered with the `config` crate, lowest to highest priority:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. TOML file: `--config <path>` (must exist) or `./kitstock.toml` (optional)
//! 3. Environment: `KITSTOCK_` prefix, `__` between sections
//!    (e.g. `KITSTOCK_DATABASE__PATH=/var/lib/kitstock.db`)
//!
//! ```toml
//! [database]
//! path = "./kitstock.db"
//! max_connections = 5
//! run_migrations = true
//!
//! [logging]
//! filter = "info,kitstock=debug,sqlx=warn"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use kitstock_db::DbConfig;
use serde::{Deserialize, Serialize};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "kitstock.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "KITSTOCK";

/// Default tracing filter when neither `RUST_LOG` nor the file sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,kitstock=debug,sqlx=warn";

/// Kitstock configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file, created on first use. `:memory:` for a throwaway database.
    pub path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// Apply pending migrations when connecting
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: PathBuf::from("./kitstock.db"),
            max_connections: 5,
            run_migrations: true,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives; `RUST_LOG` overrides them.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the layered configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        Self::from_builder(Config::builder().add_source(file).add_source(env))
    }

    /// Loads configuration from TOML text only (no file, no environment).
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("database.path".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database.max_connections".to_string(),
            ));
        }

        Ok(())
    }

    /// Pool settings for [`kitstock_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        if self.database.path.as_os_str() == kitstock_db::pool::MEMORY_PATH {
            return DbConfig::in_memory().run_migrations(self.database.run_migrations);
        }

        DbConfig::new(&self.database.path)
            .max_connections(self.database.max_connections)
            .run_migrations(self.database.run_migrations)
    }
}

/// `KITSTOCK_<SECTION>__<KEY>` variables, e.g. `KITSTOCK_DATABASE__PATH`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
