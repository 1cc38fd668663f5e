//! Migration ledger: the persisted record of executed migrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use lumen_db::{DatabaseHandle, SqlParam};

use crate::error::{MigrateResult, MigrationError};

/// Name of the ledger table. Stable across implementations.
pub const LEDGER_TABLE: &str = "_migrations";

/// Name of the advisory lock table.
pub const LOCK_TABLE: &str = "_migration_lock";

/// DDL for the ledger and lock tables. Idempotent.
pub const LEDGER_INIT_SQL: &str = "\
CREATE TABLE IF NOT EXISTS _migrations (
    id TEXT PRIMARY KEY,
    name TEXT UNIQUE NOT NULL,
    version TEXT NOT NULL,
    description TEXT,
    executed_at TEXT NOT NULL,
    checksum TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS _migration_lock (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    locked_at TEXT NOT NULL
);
";

/// A record of an executed migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Record id (UUID).
    pub id: String,
    /// Migration name. Unique across all records.
    pub name: String,
    /// Migration version at execution time.
    pub version: String,
    /// Migration description at execution time.
    pub description: String,
    /// When the migration was applied.
    pub executed_at: DateTime<Utc>,
    /// Checksum computed at execution time.
    pub checksum: String,
}

/// Ensure the ledger and lock tables exist.
pub async fn ensure_table(handle: &dyn DatabaseHandle) -> MigrateResult<()> {
    handle.execute_batch(LEDGER_INIT_SQL).await?;
    Ok(())
}

/// All executed migration records, ascending by execution time.
pub async fn all_records(handle: &dyn DatabaseHandle) -> MigrateResult<Vec<MigrationRecord>> {
    let rows = handle
        .query(
            "SELECT id, name, version, description, executed_at, checksum \
             FROM _migrations ORDER BY executed_at ASC",
            vec![],
        )
        .await?;

    rows.iter().map(record_from_row).collect()
}

/// The most recently executed migration, if any.
pub async fn last_executed(handle: &dyn DatabaseHandle) -> MigrateResult<Option<MigrationRecord>> {
    let row = handle
        .query_optional(
            "SELECT id, name, version, description, executed_at, checksum \
             FROM _migrations ORDER BY executed_at DESC LIMIT 1",
            vec![],
        )
        .await?;

    row.as_ref().map(record_from_row).transpose()
}

/// Insert a record for a migration that just ran.
pub async fn insert_record(
    handle: &dyn DatabaseHandle,
    record: &MigrationRecord,
) -> MigrateResult<()> {
    handle
        .exec(
            "INSERT INTO _migrations (id, name, version, description, executed_at, checksum) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            vec![
                SqlParam::from(record.id.as_str()),
                SqlParam::from(record.name.as_str()),
                SqlParam::from(record.version.as_str()),
                SqlParam::from(record.description.as_str()),
                SqlParam::from(record.executed_at),
                SqlParam::from(record.checksum.as_str()),
            ],
        )
        .await?;
    Ok(())
}

/// Delete the record for a rolled-back migration. Returns rows removed.
pub async fn delete_record(handle: &dyn DatabaseHandle, name: &str) -> MigrateResult<u64> {
    let changes = handle
        .exec(
            "DELETE FROM _migrations WHERE name = ?1",
            vec![SqlParam::from(name)],
        )
        .await?;
    Ok(changes)
}

/// Acquire the advisory migration lock.
///
/// A single row in the lock table marks a live migration session. The caller
/// must release on every exit path of the critical section.
pub async fn acquire_lock(handle: &dyn DatabaseHandle) -> MigrateResult<()> {
    let changes = handle
        .exec(
            "INSERT OR IGNORE INTO _migration_lock (id, locked_at) VALUES (1, ?1)",
            vec![SqlParam::from(Utc::now())],
        )
        .await?;

    if changes == 0 {
        return Err(MigrationError::lock_failed(
            "another migration session holds the lock",
        ));
    }

    Ok(())
}

/// Release the advisory migration lock.
pub async fn release_lock(handle: &dyn DatabaseHandle) -> MigrateResult<()> {
    handle
        .exec("DELETE FROM _migration_lock WHERE id = 1", vec![])
        .await?;
    Ok(())
}

/// Decode a ledger row.
fn record_from_row(row: &JsonValue) -> MigrateResult<MigrationRecord> {
    let text = |field: &str| -> MigrateResult<String> {
        match &row[field] {
            JsonValue::String(s) => Ok(s.clone()),
            JsonValue::Null => Ok(String::new()),
            other => Err(MigrationError::invalid_record(format!(
                "column '{}' has unexpected value {}",
                field, other
            ))),
        }
    };

    let executed_at_raw = text("executed_at")?;
    let executed_at = DateTime::parse_from_rfc3339(&executed_at_raw)
        .map_err(|e| {
            MigrationError::invalid_record(format!(
                "executed_at '{}' is not RFC 3339: {}",
                executed_at_raw, e
            ))
        })?
        .with_timezone(&Utc);

    Ok(MigrationRecord {
        id: text("id")?,
        name: text("name")?,
        version: text("version")?,
        description: text("description")?,
        executed_at,
        checksum: text("checksum")?,
    })
}
