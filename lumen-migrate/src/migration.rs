//! Migration definitions.

use lumen_db::DatabaseHandle;

use crate::error::{MigrateResult, MigrationError};

/// A named, versioned schema change with forward and reverse procedures.
///
/// Implementations receive the database handle explicitly; migrations never
/// capture an ambient connection. The engine owns the handle lifetime and
/// enforces the per-step timeout around `up`/`down`.
#[async_trait::async_trait]
pub trait Migration: Send + Sync {
    /// Unique migration name. Identifies the migration in the ledger.
    fn name(&self) -> &str;

    /// Unique ordering key (e.g. `"1.2.0"`).
    fn version(&self) -> &str;

    /// Human-readable summary. Part of the checksum input.
    fn description(&self) -> &str {
        ""
    }

    /// Apply the schema change.
    async fn up(&self, handle: &dyn DatabaseHandle) -> MigrateResult<()>;

    /// Reverse the schema change.
    async fn down(&self, handle: &dyn DatabaseHandle) -> MigrateResult<()>;
}

/// A migration defined by raw up/down SQL batches.
///
/// Covers the common case where a schema change is plain DDL; anything that
/// needs row-level logic implements [`Migration`] directly.
#[derive(Debug, Clone)]
pub struct SqlMigration {
    name: String,
    version: String,
    description: String,
    up_sql: String,
    down_sql: String,
}

impl SqlMigration {
    /// Create a new SQL migration.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        up_sql: impl Into<String>,
        down_sql: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            up_sql: up_sql.into(),
            down_sql: down_sql.into(),
        }
    }
}

#[async_trait::async_trait]
impl Migration for SqlMigration {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn up(&self, handle: &dyn DatabaseHandle) -> MigrateResult<()> {
        handle
            .execute_batch(&self.up_sql)
            .await
            .map_err(MigrationError::Database)
    }

    async fn down(&self, handle: &dyn DatabaseHandle) -> MigrateResult<()> {
        handle
            .execute_batch(&self.down_sql)
            .await
            .map_err(MigrationError::Database)
    }
}
