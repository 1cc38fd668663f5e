//! Seeding orchestration.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use lumen_db::DatabaseHandle;
use tracing::info;

use crate::environment::Environment;
use crate::report::SeedReport;
use crate::seeder::Seeder;
use crate::seeders::{
    EventsSeeder, MediaSeeder, NewslettersSeeder, QuotesSeeder, TeachingsSeeder, UsersSeeder,
};

/// Runs the fixed, ordered set of per-table seeders.
///
/// The users seeder runs first because media ownership foreign-keys to the
/// admin user; the independent content tables are seeded concurrently; media
/// runs last. Each seeder owns exactly one table, so no extra
/// synchronization is needed when merging results.
pub struct SeedEngine {
    handle: Arc<dyn DatabaseHandle>,
}

impl SeedEngine {
    /// Create a new seed engine.
    pub fn new(handle: Arc<dyn DatabaseHandle>) -> Self {
        Self { handle }
    }

    /// Seed all tables for the given environment.
    pub async fn seed(&self, environment: Environment) -> SeedReport {
        info!(environment = %environment, "Seeding reference data");

        let mut results = BTreeMap::new();

        // The admin identity must exist before media ownership resolves.
        let users = UsersSeeder;
        results.insert(
            users.table().to_string(),
            users.seed(self.handle.as_ref(), environment).await,
        );

        let independent: Vec<Box<dyn Seeder>> = vec![
            Box::new(TeachingsSeeder),
            Box::new(EventsSeeder),
            Box::new(QuotesSeeder),
            Box::new(NewslettersSeeder),
        ];

        let seeded = join_all(independent.iter().map(|seeder| async {
            (
                seeder.table().to_string(),
                seeder.seed(self.handle.as_ref(), environment).await,
            )
        }))
        .await;

        for (table, report) in seeded {
            results.insert(table, report);
        }

        let media = MediaSeeder;
        results.insert(
            media.table().to_string(),
            media.seed(self.handle.as_ref(), environment).await,
        );

        let report = SeedReport::from_results(results);
        info!(
            success = report.success,
            inserted = report.total_inserted(),
            skipped = report.total_skipped(),
            "Seeding complete"
        );
        report
    }
}
