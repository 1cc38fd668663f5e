//! # lumen-db
//!
//! Database handle abstraction for Lumen.
//!
//! This crate defines the [`DatabaseHandle`] trait that the migration engine
//! and seeder are written against, plus a SQLite implementation backed by
//! `tokio-rusqlite`. The handle surface is deliberately small:
//!
//! - [`DatabaseHandle::execute_batch`] for multi-statement DDL
//! - [`DatabaseHandle::query`] for row-returning statements
//! - [`DatabaseHandle::exec`] for statements that report affected rows
//!
//! Rows come back as `serde_json::Value` objects keyed by column name, so
//! callers never touch driver-specific row types.
//!
//! ```rust,ignore
//! use lumen_db::{DatabaseHandle, SqliteHandle, SqlParam};
//!
//! async fn count_users(handle: &dyn DatabaseHandle) -> lumen_db::DbResult<i64> {
//!     let row = handle
//!         .query("SELECT COUNT(*) AS n FROM users", vec![])
//!         .await?;
//!     Ok(row[0]["n"].as_i64().unwrap_or(0))
//! }
//! ```

pub mod error;
pub mod handle;
pub mod param;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use handle::DatabaseHandle;
pub use param::SqlParam;
pub use sqlite::SqliteHandle;
