//! Error types for database handle operations.

use thiserror::Error;

/// Result type alias for handle operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors surfaced by a database handle.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database is unreachable or could not be opened.
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQLite driver error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),

    /// A statement failed to execute.
    #[error("Query error: {0}")]
    Query(String),

    /// A column value could not be converted.
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// Internal invariant violation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DbError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Create a type conversion error.
    pub fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(tokio_rusqlite::Error::Rusqlite(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbError::connection("database is locked");
        assert!(err.to_string().contains("Connection error"));
        assert!(err.to_string().contains("database is locked"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(DbError::query("test"), DbError::Query(_)));
        assert!(matches!(
            DbError::type_conversion("test"),
            DbError::TypeConversion(_)
        ));
        assert!(matches!(DbError::internal("test"), DbError::Internal(_)));
    }
}
