//! Command implementations.

use std::sync::Arc;

use std::time::Duration;

use lumen_db::{DatabaseHandle, SqliteHandle};
use lumen_migrate::{EngineConfig, MigrationRegistry};
use lumen_seed::Environment;
use tracing::debug;

use crate::config::Config;
use crate::error::{CliError, CliResult};

pub mod health;
pub mod init;
pub mod migrate;
pub mod rollback;
pub mod seed;
pub mod stats;
pub mod status;
pub mod validate;

/// An open database handle plus the application's migration catalog.
pub(crate) struct Context {
    pub handle: Arc<dyn DatabaseHandle>,
    pub registry: Arc<MigrationRegistry>,
}

/// Open the configured database and build the migration registry.
pub(crate) async fn connect(config: &Config, override_url: Option<&str>) -> CliResult<Context> {
    let url = config.database_url(override_url)?;
    debug!(url = %url, "Opening database");
    let handle = SqliteHandle::from_url(&url).await?;
    let registry = Arc::new(lumen::catalog::catalog()?);

    Ok(Context {
        handle: Arc::new(handle),
        registry,
    })
}

/// Build the engine configuration from the config file's timeout setting.
pub(crate) fn engine_config(config: &Config) -> EngineConfig {
    match config.migrations.step_timeout_secs {
        Some(0) => EngineConfig::new().step_timeout(None),
        Some(secs) => EngineConfig::new().step_timeout(Some(Duration::from_secs(secs))),
        None => EngineConfig::default(),
    }
}

/// Resolve the seeding environment: `--production` wins, then the config
/// file, then development.
pub(crate) fn resolve_environment(production: bool, config: &Config) -> CliResult<Environment> {
    if production {
        return Ok(Environment::Production);
    }

    match &config.seed.environment {
        Some(name) => name.parse().map_err(CliError::Config),
        None => Ok(Environment::Development),
    }
}
