//! SQLite implementation of the database handle.

use std::path::Path;

use rusqlite::types::{Value, ValueRef};
use serde_json::Value as JsonValue;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::handle::DatabaseHandle;
use crate::param::SqlParam;

/// A SQLite-backed database handle.
///
/// Wraps a `tokio-rusqlite` connection; the underlying connection runs on a
/// dedicated thread, so the handle is cheap to clone and share.
#[derive(Clone)]
pub struct SqliteHandle {
    conn: Connection,
}

impl SqliteHandle {
    /// Open a database file, creating it if absent.
    pub async fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(|e| DbError::connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database. Useful for tests.
    pub async fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| DbError::connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open from a database URL (`sqlite:path`, `sqlite://path`, or a bare path).
    pub async fn from_url(url: &str) -> DbResult<Self> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if path == ":memory:" {
            Self::open_in_memory().await
        } else {
            Self::open(path).await
        }
    }
}

#[async_trait::async_trait]
impl DatabaseHandle for SqliteHandle {
    async fn execute_batch(&self, ddl: &str) -> DbResult<()> {
        let sql = ddl.to_string();
        debug!(sql = %sql, "Executing batch");

        self.conn
            .call(move |conn| Ok(conn.execute_batch(&sql)?))
            .await
            .map_err(DbError::from)
    }

    async fn query(&self, sql: &str, params: Vec<SqlParam>) -> DbResult<Vec<JsonValue>> {
        let sql = sql.to_string();
        debug!(sql = %sql, "Executing query");

        let params: Vec<Value> = params.iter().map(to_sqlite_value).collect();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let columns: Vec<String> =
                    stmt.column_names().iter().map(|s| s.to_string()).collect();

                let params_ref: Vec<&dyn rusqlite::ToSql> =
                    params.iter().map(|v| v as &dyn rusqlite::ToSql).collect();

                let rows = stmt.query_map(params_ref.as_slice(), |row| {
                    let mut map = serde_json::Map::new();
                    for (i, col) in columns.iter().enumerate() {
                        map.insert(col.clone(), get_value_at_index(row, i));
                    }
                    Ok(JsonValue::Object(map))
                })?;

                let results: Result<Vec<_>, _> = rows.collect();
                Ok(results?)
            })
            .await
            .map_err(DbError::from)
    }

    async fn exec(&self, sql: &str, params: Vec<SqlParam>) -> DbResult<u64> {
        let sql = sql.to_string();
        debug!(sql = %sql, "Executing statement");

        let params: Vec<Value> = params.iter().map(to_sqlite_value).collect();

        self.conn
            .call(move |conn| {
                let params_ref: Vec<&dyn rusqlite::ToSql> =
                    params.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
                Ok(conn.execute(&sql, params_ref.as_slice())? as u64)
            })
            .await
            .map_err(DbError::from)
    }
}

/// Convert a bind parameter to a SQLite value.
fn to_sqlite_value(param: &SqlParam) -> Value {
    match param {
        SqlParam::Null => Value::Null,
        SqlParam::Integer(i) => Value::Integer(*i),
        SqlParam::Real(f) => Value::Real(*f),
        SqlParam::Text(s) => Value::Text(s.clone()),
    }
}

/// Convert a SQLite value to a JSON value.
fn from_sqlite_value(value: ValueRef<'_>) -> JsonValue {
    match value {
        ValueRef::Null => JsonValue::Null,
        ValueRef::Integer(i) => JsonValue::Number(i.into()),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        // Text stays text, byte for byte; callers that store serialized
        // structures must decode them themselves.
        ValueRef::Text(bytes) => JsonValue::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Blob(bytes) => JsonValue::String(String::from_utf8_lossy(bytes).to_string()),
    }
}

/// Get a JSON value from a row at the given column index.
fn get_value_at_index(row: &rusqlite::Row<'_>, index: usize) -> JsonValue {
    if let Ok(v) = row.get_ref(index) {
        from_sqlite_value(v)
    } else {
        JsonValue::Null
    }
}
