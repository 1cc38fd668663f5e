//! Migration engine implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use lumen_db::DatabaseHandle;

use crate::checksum::{self, ValidationReport};
use crate::error::{MigrateResult, MigrationError};
use crate::ledger::{self, MigrationRecord};
use crate::migration::Migration;
use crate::registry::MigrationRegistry;

/// Configuration for the migration engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum wall-clock time for a single `up()`/`down()` step.
    /// `None` disables the timeout.
    pub step_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-step timeout.
    pub fn step_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.step_timeout = timeout;
        self
    }
}

/// Outcome of a single migration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The forward step succeeded and was recorded.
    Success,
    /// The step failed; the batch stopped here.
    Failed,
    /// The reverse step succeeded and the record was removed.
    RolledBack,
}

/// Per-migration entry in a [`MigrationResult`].
#[derive(Debug, Clone)]
pub struct MigrationDetail {
    /// Migration name.
    pub name: String,
    /// Migration version.
    pub version: String,
    /// What happened to this migration.
    pub outcome: StepOutcome,
    /// Failure message, if any.
    pub message: Option<String>,
    /// Step duration in milliseconds.
    pub duration_ms: i64,
}

/// Aggregated result of a migration run or rollback.
#[derive(Debug, Clone)]
pub struct MigrationResult {
    /// False as soon as any step failed.
    pub success: bool,
    /// Number of migrations applied (or rolled back).
    pub migrations_run: usize,
    /// Errors encountered, in order.
    pub errors: Vec<String>,
    /// Per-migration details, in execution order.
    pub details: Vec<MigrationDetail>,
}

impl Default for MigrationResult {
    fn default() -> Self {
        Self {
            success: true,
            migrations_run: 0,
            errors: Vec::new(),
            details: Vec::new(),
        }
    }
}

impl MigrationResult {
    /// Get a one-line summary of the result.
    pub fn summary(&self) -> String {
        if self.migrations_run == 0 && self.errors.is_empty() {
            "No migrations applied".to_string()
        } else if self.errors.is_empty() {
            format!("{} applied", self.migrations_run)
        } else {
            format!(
                "{} applied, {} failed",
                self.migrations_run,
                self.errors.len()
            )
        }
    }
}

/// The next migration that would run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMigration {
    /// Migration name.
    pub name: String,
    /// Migration version.
    pub version: String,
}

/// Migration status information.
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Number of registered migrations.
    pub total: usize,
    /// Number of executed migrations (ledger records).
    pub executed: usize,
    /// Number of pending migrations.
    pub pending: usize,
    /// The most recently executed migration, if any.
    pub last_executed: Option<MigrationRecord>,
    /// The next migration that would run, if any.
    pub next_pending: Option<PendingMigration>,
}

enum Direction {
    Up,
    Down,
}

/// The migration execution engine.
///
/// Applies pending migrations strictly in ascending version order under an
/// advisory lock, records each success in the ledger, and stops the batch at
/// the first failure. The policy is forward-only: migrations already applied
/// in a failed batch stay applied; recovery goes through
/// [`MigrationEngine::rollback_last`].
pub struct MigrationEngine {
    handle: Arc<dyn DatabaseHandle>,
    registry: Arc<MigrationRegistry>,
    config: EngineConfig,
}

impl MigrationEngine {
    /// Create a new engine with the default configuration.
    pub fn new(handle: Arc<dyn DatabaseHandle>, registry: Arc<MigrationRegistry>) -> Self {
        Self::with_config(handle, registry, EngineConfig::default())
    }

    /// Create a new engine with an explicit configuration.
    pub fn with_config(
        handle: Arc<dyn DatabaseHandle>,
        registry: Arc<MigrationRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            handle,
            registry,
            config,
        }
    }

    /// The registry this engine executes from.
    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    /// Apply all pending migrations.
    pub async fn run(&self) -> MigrateResult<MigrationResult> {
        ledger::ensure_table(self.handle.as_ref()).await?;
        ledger::acquire_lock(self.handle.as_ref()).await?;

        let outcome = self.run_locked().await;

        // The lock must come off on every exit path, success or not.
        let released = ledger::release_lock(self.handle.as_ref()).await;
        let result = outcome?;
        released?;
        Ok(result)
    }

    async fn run_locked(&self) -> MigrateResult<MigrationResult> {
        let executed = ledger::all_records(self.handle.as_ref()).await?;
        let pending = self.registry.pending(&executed);

        let mut result = MigrationResult::default();

        if pending.is_empty() {
            debug!("No pending migrations");
            return Ok(result);
        }

        info!(count = pending.len(), "Applying pending migrations");

        for migration in pending {
            let start = Instant::now();

            match self.run_step(migration.as_ref(), Direction::Up).await {
                Ok(()) => {
                    let record = MigrationRecord {
                        id: Uuid::new_v4().to_string(),
                        name: migration.name().to_string(),
                        version: migration.version().to_string(),
                        description: migration.description().to_string(),
                        executed_at: Utc::now(),
                        checksum: checksum::checksum(migration.as_ref()),
                    };
                    ledger::insert_record(self.handle.as_ref(), &record).await?;

                    let duration_ms = start.elapsed().as_millis() as i64;
                    info!(
                        migration = %migration.name(),
                        version = %migration.version(),
                        duration_ms,
                        "Migration applied"
                    );

                    result.migrations_run += 1;
                    result.details.push(MigrationDetail {
                        name: migration.name().to_string(),
                        version: migration.version().to_string(),
                        outcome: StepOutcome::Success,
                        message: None,
                        duration_ms,
                    });
                }
                Err(e) => {
                    error!(
                        migration = %migration.name(),
                        version = %migration.version(),
                        error = %e,
                        "Migration failed; halting batch"
                    );

                    result.success = false;
                    result.errors.push(e.to_string());
                    result.details.push(MigrationDetail {
                        name: migration.name().to_string(),
                        version: migration.version().to_string(),
                        outcome: StepOutcome::Failed,
                        message: Some(e.to_string()),
                        duration_ms: start.elapsed().as_millis() as i64,
                    });

                    // Forward-only: earlier successes in this batch stay applied.
                    break;
                }
            }
        }

        Ok(result)
    }

    /// Roll back the most recently executed migration.
    ///
    /// A no-op success when the ledger is empty. Fails loudly when the
    /// recorded migration is no longer registered.
    pub async fn rollback_last(&self) -> MigrateResult<MigrationResult> {
        ledger::ensure_table(self.handle.as_ref()).await?;
        ledger::acquire_lock(self.handle.as_ref()).await?;

        let outcome = self.rollback_locked().await;

        let released = ledger::release_lock(self.handle.as_ref()).await;
        let result = outcome?;
        released?;
        Ok(result)
    }

    async fn rollback_locked(&self) -> MigrateResult<MigrationResult> {
        let mut result = MigrationResult::default();

        let Some(record) = ledger::last_executed(self.handle.as_ref()).await? else {
            debug!("Nothing to roll back");
            return Ok(result);
        };

        let migration = self
            .registry
            .get(&record.name)
            .ok_or_else(|| MigrationError::NotFound(record.name.clone()))?
            .clone();

        let start = Instant::now();

        match self.run_step(migration.as_ref(), Direction::Down).await {
            Ok(()) => {
                ledger::delete_record(self.handle.as_ref(), &record.name).await?;

                let duration_ms = start.elapsed().as_millis() as i64;
                info!(
                    migration = %record.name,
                    version = %record.version,
                    duration_ms,
                    "Migration rolled back"
                );

                result.migrations_run = 1;
                result.details.push(MigrationDetail {
                    name: record.name,
                    version: record.version,
                    outcome: StepOutcome::RolledBack,
                    message: None,
                    duration_ms,
                });
            }
            Err(e) => {
                error!(
                    migration = %record.name,
                    version = %record.version,
                    error = %e,
                    "Rollback failed"
                );

                result.success = false;
                result.errors.push(e.to_string());
                result.details.push(MigrationDetail {
                    name: record.name,
                    version: record.version,
                    outcome: StepOutcome::Failed,
                    message: Some(e.to_string()),
                    duration_ms: start.elapsed().as_millis() as i64,
                });
            }
        }

        Ok(result)
    }

    /// Get migration status.
    pub async fn status(&self) -> MigrateResult<MigrationStatus> {
        ledger::ensure_table(self.handle.as_ref()).await?;

        let executed = ledger::all_records(self.handle.as_ref()).await?;
        let pending = self.registry.pending(&executed);
        let last_executed = ledger::last_executed(self.handle.as_ref()).await?;

        Ok(MigrationStatus {
            total: self.registry.len(),
            executed: executed.len(),
            pending: pending.len(),
            last_executed,
            next_pending: pending.first().map(|m| PendingMigration {
                name: m.name().to_string(),
                version: m.version().to_string(),
            }),
        })
    }

    /// Validate ledger integrity against the registry.
    pub async fn validate(&self) -> MigrateResult<ValidationReport> {
        ledger::ensure_table(self.handle.as_ref()).await?;
        let records = ledger::all_records(self.handle.as_ref()).await?;
        Ok(checksum::validate(&self.registry, &records))
    }

    /// Run one `up()`/`down()` step under the configured timeout.
    async fn run_step(&self, migration: &dyn Migration, direction: Direction) -> MigrateResult<()> {
        let step = async {
            match direction {
                Direction::Up => migration.up(self.handle.as_ref()).await,
                Direction::Down => migration.down(self.handle.as_ref()).await,
            }
        };

        let outcome = match self.config.step_timeout {
            Some(limit) => match tokio::time::timeout(limit, step).await {
                Ok(res) => res,
                Err(_) => Err(MigrationError::Timeout {
                    name: migration.name().to_string(),
                    seconds: limit.as_secs(),
                }),
            },
            None => step.await,
        };

        outcome.map_err(|e| match e {
            timeout @ MigrationError::Timeout { .. } => timeout,
            other => MigrationError::execution_failed(
                migration.name(),
                migration.version(),
                other.to_string(),
            ),
        })
    }
}
