//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Default config file name (lives in project root)
pub const CONFIG_FILE_NAME: &str = "lumen.toml";

/// Lumen CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Migration configuration
    pub migrations: MigrationConfig,

    /// Seed configuration
    pub seed: SeedConfig,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the database URL: explicit override, then config file, then
    /// the `DATABASE_URL` environment variable.
    pub fn database_url(&self, override_url: Option<&str>) -> CliResult<String> {
        if let Some(url) = override_url {
            return Ok(url.to_string());
        }
        if let Some(url) = &self.database.url {
            return Ok(url.clone());
        }
        std::env::var("DATABASE_URL").map_err(|_| {
            CliError::Config(
                "no database URL configured; set database.url in lumen.toml, \
                 pass --url, or export DATABASE_URL"
                    .to_string(),
            )
        })
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: Option<String>,
}

/// Migration configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Per-step timeout in seconds. Zero disables the timeout; absent keeps
    /// the engine default.
    pub step_timeout_secs: Option<u64>,
}

/// Seed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Default environment name (development, staging, production)
    pub environment: Option<String>,
}
