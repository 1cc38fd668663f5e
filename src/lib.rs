//! # Lumen
//!
//! Database lifecycle management for the Lumen content platform.
//!
//! Lumen provides:
//! - A versioned migration engine with checksum integrity validation
//! - An idempotent, environment-aware reference-data seeder
//! - A one-call initializer that migrates and then seeds
//! - Health probes and row-count statistics
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lumen::{catalog, initialize_database, InitOptions};
//! use lumen_db::SqliteHandle;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handle = Arc::new(SqliteHandle::open("lumen.db").await?);
//!     let registry = Arc::new(catalog::catalog()?);
//!
//!     let result = initialize_database(handle, registry, InitOptions::default()).await?;
//!     println!("{}", result.migrations.summary());
//!     Ok(())
//! }
//! ```
//!
//! The heavy lifting lives in the member crates: [`lumen_db`] for the
//! database handle abstraction, [`lumen_migrate`] for the migration engine,
//! and [`lumen_seed`] for the seeders. This crate ties them together with the
//! application's migration catalog and orchestration entry points.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod health;
pub mod init;
pub mod stats;

pub use catalog::{catalog, APP_TABLES};
pub use health::{check_database_health, HealthCheck, HealthReport};
pub use init::{initialize_database, DatabaseInitResult, InitOptions};
pub use stats::{database_stats, DatabaseStats};

// Re-export the member crates so applications can depend on `lumen` alone.
pub use lumen_db;
pub use lumen_migrate;
pub use lumen_seed;
