//! Row-count and migration statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use lumen_db::DatabaseHandle;
use lumen_migrate::{MigrateResult, MigrationEngine, MigrationRegistry, MigrationStatus};
use tracing::debug;

use crate::catalog::APP_TABLES;

/// A point-in-time snapshot of database contents.
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Row counts per application table. A table that cannot be counted
    /// (typically because it does not exist yet) reports zero.
    pub tables: BTreeMap<String, u64>,
    /// Migration ledger totals.
    pub migrations: MigrationStatus,
}

impl DatabaseStats {
    /// Total rows across all application tables.
    pub fn total_rows(&self) -> u64 {
        self.tables.values().sum()
    }
}

/// Collect row counts for every application table plus migration totals.
///
/// Table counting is best-effort; only ledger access errors propagate.
pub async fn database_stats(
    handle: Arc<dyn DatabaseHandle>,
    registry: Arc<MigrationRegistry>,
) -> MigrateResult<DatabaseStats> {
    let mut tables = BTreeMap::new();

    for table in APP_TABLES {
        let count = count_rows(handle.as_ref(), table).await;
        tables.insert(table.to_string(), count);
    }

    let migrations = MigrationEngine::new(handle, registry).status().await?;

    debug!(
        executed = migrations.executed,
        pending = migrations.pending,
        "Collected database stats"
    );

    Ok(DatabaseStats { tables, migrations })
}

async fn count_rows(handle: &dyn DatabaseHandle, table: &str) -> u64 {
    let sql = format!("SELECT COUNT(*) AS n FROM {}", table);
    match handle.query_optional(&sql, vec![]).await {
        Ok(Some(row)) => row["n"].as_u64().unwrap_or(0),
        _ => 0,
    }
}
