//! The database handle trait.

use serde_json::Value as JsonValue;

use crate::error::DbResult;
use crate::param::SqlParam;

/// Executes statements against a database.
///
/// The migration engine and seeder are written entirely against this trait;
/// the concrete driver is injected by the caller. Implementations must be
/// safe to share across tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait DatabaseHandle: Send + Sync {
    /// Execute a batch of statements (DDL), separated by semicolons.
    async fn execute_batch(&self, ddl: &str) -> DbResult<()>;

    /// Execute a row-returning statement.
    ///
    /// Each row is a JSON object keyed by column name.
    async fn query(&self, sql: &str, params: Vec<SqlParam>) -> DbResult<Vec<JsonValue>>;

    /// Execute a statement and return the number of affected rows.
    async fn exec(&self, sql: &str, params: Vec<SqlParam>) -> DbResult<u64>;

    /// Execute a row-returning statement and take the first row, if any.
    async fn query_optional(
        &self,
        sql: &str,
        params: Vec<SqlParam>,
    ) -> DbResult<Option<JsonValue>> {
        Ok(self.query(sql, params).await?.into_iter().next())
    }
}
