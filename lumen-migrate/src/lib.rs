//! # lumen-migrate
//!
//! Migration engine for Lumen.
//!
//! This crate provides:
//! - An in-memory [`MigrationRegistry`] enforcing name/version uniqueness
//!   with a pluggable [`VersionOrdering`] strategy
//! - SHA-256 [`checksum`] fingerprints and ledger [`validation`](checksum::validate)
//! - A [`MigrationEngine`] that applies pending migrations in order under an
//!   advisory lock, with a configurable per-step timeout
//! - Single-step rollback and status reporting
//!
//! The engine is written against the `lumen-db` [`DatabaseHandle`] trait and
//! takes all collaborators by injection; there are no process-wide singletons.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lumen_migrate::{MigrationEngine, MigrationRegistry, SqlMigration};
//!
//! async fn migrate(handle: Arc<dyn lumen_db::DatabaseHandle>) -> lumen_migrate::MigrateResult<()> {
//!     let mut registry = MigrationRegistry::new();
//!     registry.register(Arc::new(SqlMigration::new(
//!         "initial_schema",
//!         "1.0.0",
//!         "Create core tables",
//!         "CREATE TABLE widgets (id INTEGER PRIMARY KEY);",
//!         "DROP TABLE widgets;",
//!     )))?;
//!
//!     let engine = MigrationEngine::new(handle, Arc::new(registry));
//!     let result = engine.run().await?;
//!     println!("{}", result.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Failure policy
//!
//! Batches are forward-only: the first failing migration stops the run, and
//! migrations already applied in the same batch stay applied. Recovery is the
//! explicit [`MigrationEngine::rollback_last`] operation, one step per call.

pub mod checksum;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod migration;
pub mod registry;

// Re-exports
pub use checksum::{checksum, validate, ValidationReport};
pub use engine::{
    EngineConfig, MigrationDetail, MigrationEngine, MigrationResult, MigrationStatus,
    PendingMigration, StepOutcome,
};
pub use error::{MigrateResult, MigrationError};
pub use ledger::{MigrationRecord, LEDGER_TABLE};
pub use migration::{Migration, SqlMigration};
pub use registry::{MigrationRegistry, VersionOrdering};
