//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(lumen::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(lumen::config))]
    Config(String),

    /// Migration error
    #[error("Migration error: {0}")]
    #[diagnostic(code(lumen::migration))]
    Migration(String),

    /// Seeding error
    #[error("Seed error: {0}")]
    #[diagnostic(code(lumen::seed))]
    Seed(String),

    /// Database error
    #[error("Database error: {0}")]
    #[diagnostic(code(lumen::database))]
    Database(String),

    /// Command error
    #[error("Command error: {0}")]
    #[diagnostic(code(lumen::command))]
    Command(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

impl From<lumen_db::DbError> for CliError {
    fn from(err: lumen_db::DbError) -> Self {
        CliError::Database(err.to_string())
    }
}

impl From<lumen_migrate::MigrationError> for CliError {
    fn from(err: lumen_migrate::MigrationError) -> Self {
        CliError::Migration(err.to_string())
    }
}
