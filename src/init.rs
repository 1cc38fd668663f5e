//! One-call database bootstrap: migrate, then seed.

use std::sync::Arc;

use lumen_db::DatabaseHandle;
use lumen_migrate::{
    EngineConfig, MigrateResult, MigrationEngine, MigrationRegistry, MigrationResult,
};
use lumen_seed::{Environment, SeedEngine, SeedReport};
use tracing::{info, warn};

/// What the initializer should do.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Apply pending migrations.
    pub run_migrations: bool,
    /// Seed reference data after a successful migration run.
    pub run_seeding: bool,
    /// Environment to seed for.
    pub environment: Environment,
    /// Engine configuration for the migration phase.
    pub engine: EngineConfig,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            run_migrations: true,
            run_seeding: true,
            environment: Environment::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Combined outcome of the initialization phases.
#[derive(Debug)]
pub struct DatabaseInitResult {
    /// Outcome of the migration phase.
    pub migrations: MigrationResult,
    /// Outcome of the seeding phase. `None` when seeding was disabled or
    /// skipped because migrations failed.
    pub seeding: Option<SeedReport>,
    /// True only when every phase that ran succeeded.
    pub success: bool,
    /// Errors from both phases: migration errors in batch order, then seed
    /// errors prefixed with their table name.
    pub errors: Vec<String>,
}

/// Bring a database up to date: apply pending migrations, then seed.
///
/// Seeding never runs against a schema the migration phase failed to
/// establish. A failed migration batch is reported through the result, not an
/// `Err`; `Err` is reserved for infrastructure failures such as an unreachable
/// database or a held advisory lock.
pub async fn initialize_database(
    handle: Arc<dyn DatabaseHandle>,
    registry: Arc<MigrationRegistry>,
    options: InitOptions,
) -> MigrateResult<DatabaseInitResult> {
    info!(
        migrations = options.run_migrations,
        seeding = options.run_seeding,
        environment = %options.environment,
        "Initializing database"
    );

    let migrations = if options.run_migrations {
        MigrationEngine::with_config(handle.clone(), registry, options.engine.clone())
            .run()
            .await?
    } else {
        MigrationResult::default()
    };

    let seeding = if options.run_seeding {
        if migrations.success {
            Some(SeedEngine::new(handle).seed(options.environment).await)
        } else {
            warn!("Skipping seeding: migration phase failed");
            None
        }
    } else {
        None
    };

    let success = migrations.success && seeding.as_ref().map(|s| s.success).unwrap_or(true);

    let mut errors = migrations.errors.clone();
    if let Some(report) = &seeding {
        errors.extend(report.all_errors());
    }

    Ok(DatabaseInitResult {
        migrations,
        seeding,
        success,
        errors,
    })
}
