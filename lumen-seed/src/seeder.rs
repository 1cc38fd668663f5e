//! The per-table seeder trait and insert guard.

use lumen_db::{DatabaseHandle, SqlParam};
use tracing::warn;

use crate::environment::Environment;
use crate::report::TableSeedReport;

/// Seeds one table idempotently.
///
/// A seeder only mutates its own table, which is what allows independent
/// seeders to run concurrently. All failures are captured in the returned
/// report; a seeder never propagates an error to its siblings.
#[async_trait::async_trait]
pub trait Seeder: Send + Sync {
    /// The table this seeder owns.
    fn table(&self) -> &str;

    /// Seed the table for the given environment.
    async fn seed(&self, handle: &dyn DatabaseHandle, environment: Environment) -> TableSeedReport;
}

/// Insert a record unless its natural key already exists.
///
/// Runs `exists_sql` first; a matching row counts as skipped, otherwise
/// `insert_sql` runs and counts as inserted. Any failure on either side is
/// recorded in the report's error list and the caller moves on.
pub async fn insert_if_absent(
    handle: &dyn DatabaseHandle,
    report: &mut TableSeedReport,
    key: &str,
    exists_sql: &str,
    exists_params: Vec<SqlParam>,
    insert_sql: &str,
    insert_params: Vec<SqlParam>,
) {
    match handle.query_optional(exists_sql, exists_params).await {
        Ok(Some(_)) => report.skipped += 1,
        Ok(None) => match handle.exec(insert_sql, insert_params).await {
            Ok(_) => report.inserted += 1,
            Err(e) => {
                warn!(key = %key, error = %e, "Seed insert failed");
                report.errors.push(format!("insert '{}' failed: {}", key, e));
            }
        },
        Err(e) => {
            warn!(key = %key, error = %e, "Seed existence check failed");
            report
                .errors
                .push(format!("existence check for '{}' failed: {}", key, e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_db::SqliteHandle;

    #[tokio::test]
    async fn test_insert_then_skip() {
        let handle = SqliteHandle::open_in_memory().await.unwrap();
        handle
            .execute_batch("CREATE TABLE t (slug TEXT UNIQUE NOT NULL, title TEXT);")
            .await
            .unwrap();

        let mut report = TableSeedReport::default();

        for _ in 0..2 {
            insert_if_absent(
                &handle,
                &mut report,
                "welcome",
                "SELECT slug FROM t WHERE slug = ?1",
                vec![SqlParam::from("welcome")],
                "INSERT INTO t (slug, title) VALUES (?1, ?2)",
                vec![SqlParam::from("welcome"), SqlParam::from("Welcome")],
            )
            .await;
        }

        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_recorded_not_propagated() {
        let handle = SqliteHandle::open_in_memory().await.unwrap();
        // No table at all: both the check and the insert fail.
        let mut report = TableSeedReport::default();

        insert_if_absent(
            &handle,
            &mut report,
            "welcome",
            "SELECT slug FROM missing WHERE slug = ?1",
            vec![SqlParam::from("welcome")],
            "INSERT INTO missing (slug) VALUES (?1)",
            vec![SqlParam::from("welcome")],
        )
        .await;

        assert_eq!(report.inserted, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("welcome"));
    }
}
