//! Error types for the migration engine.

use thiserror::Error;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur during migration operations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A migration with the same name is already registered.
    #[error("Migration name '{0}' is already registered")]
    DuplicateName(String),

    /// A migration with the same version is already registered.
    #[error("Migration version '{version}' is already registered by '{existing}' (rejecting '{incoming}')")]
    DuplicateVersion {
        /// The conflicting version string.
        version: String,
        /// The migration that already holds this version.
        existing: String,
        /// The migration whose registration was rejected.
        incoming: String,
    },

    /// An `up()` or `down()` step failed.
    #[error("Migration '{name}@{version}' failed: {message}")]
    ExecutionFailed {
        /// Migration name.
        name: String,
        /// Migration version.
        version: String,
        /// Underlying failure message.
        message: String,
    },

    /// A ledger record has no matching registered migration.
    #[error("Migration '{0}' not found in registry")]
    NotFound(String),

    /// The advisory lock is held by another migration session.
    #[error("Failed to acquire migration lock: {0}")]
    LockFailed(String),

    /// A migration step exceeded the configured timeout.
    #[error("Migration '{name}' timed out after {seconds}s")]
    Timeout {
        /// Migration name.
        name: String,
        /// Configured timeout in seconds.
        seconds: u64,
    },

    /// Database operation error.
    #[error("Database error: {0}")]
    Database(#[from] lumen_db::DbError),

    /// A persisted ledger row could not be decoded.
    #[error("Invalid migration record: {0}")]
    InvalidRecord(String),
}

impl MigrationError {
    /// Create an execution failure for a migration step.
    pub fn execution_failed(
        name: impl Into<String>,
        version: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ExecutionFailed {
            name: name.into(),
            version: version.into(),
            message: message.into(),
        }
    }

    /// Create a lock failed error.
    pub fn lock_failed(msg: impl Into<String>) -> Self {
        Self::LockFailed(msg.into())
    }

    /// Create an invalid record error.
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MigrationError::NotFound("add_media_library".to_string());
        assert!(err.to_string().contains("add_media_library"));
        assert!(err.to_string().contains("not found in registry"));
    }

    #[test]
    fn test_execution_failed_display() {
        let err = MigrationError::execution_failed("initial_schema", "1.0.0", "syntax error");
        let msg = err.to_string();
        assert!(msg.contains("initial_schema@1.0.0"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn test_duplicate_version_display() {
        let err = MigrationError::DuplicateVersion {
            version: "1.0.0".to_string(),
            existing: "a".to_string(),
            incoming: "b".to_string(),
        };
        assert!(err.to_string().contains("1.0.0"));
    }
}
