//! # lumen-seed
//!
//! Idempotent reference-data seeding for Lumen.
//!
//! Every seeder guards its inserts with a natural-key existence check (email,
//! slug, content key), so re-running a seed never produces duplicates: the
//! first run inserts, every later run skips. Failures are isolated per
//! record and per table; one bad row never aborts its siblings.
//!
//! Seeding is environment-gated: the essential admin identity is seeded in
//! every environment, sample content only in
//! [`Environment::Development`] and never in production.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lumen_seed::{Environment, SeedEngine};
//!
//! async fn seed(handle: Arc<dyn lumen_db::DatabaseHandle>) {
//!     let engine = SeedEngine::new(handle);
//!     let report = engine.seed(Environment::Development).await;
//!     for (table, result) in &report.results {
//!         println!("{}: {} inserted, {} skipped", table, result.inserted, result.skipped);
//!     }
//! }
//! ```

pub mod engine;
pub mod environment;
pub mod report;
pub mod seeder;
pub mod seeders;

pub use engine::SeedEngine;
pub use environment::Environment;
pub use report::{SeedReport, TableSeedReport};
pub use seeder::{insert_if_absent, Seeder};
pub use seeders::ADMIN_EMAIL;
