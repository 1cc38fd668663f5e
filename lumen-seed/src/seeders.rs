//! The application's per-table seeders.
//!
//! Natural keys: `users.email`, `teachings.slug`, `events.slug`,
//! `quotes.content_key`, `newsletters.slug`, `media.path`.

use chrono::Utc;
use lumen_db::{DatabaseHandle, SqlParam};
use tracing::{debug, info};
use uuid::Uuid;

use crate::environment::Environment;
use crate::report::TableSeedReport;
use crate::seeder::{insert_if_absent, Seeder};

/// Natural key of the administrative identity. Seeded in every environment;
/// media ownership resolves against it.
pub const ADMIN_EMAIL: &str = "admin@lumen.local";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn log_table(table: &str, report: &TableSeedReport) {
    info!(
        table = %table,
        inserted = report.inserted,
        skipped = report.skipped,
        errors = report.errors.len(),
        "Seeded table"
    );
}

/// Seeds the `users` table.
///
/// The admin identity is essential and seeded everywhere; the sample
/// contributor only exists in development.
pub struct UsersSeeder;

#[async_trait::async_trait]
impl Seeder for UsersSeeder {
    fn table(&self) -> &str {
        "users"
    }

    async fn seed(&self, handle: &dyn DatabaseHandle, environment: Environment) -> TableSeedReport {
        let mut report = TableSeedReport::default();

        let mut users: Vec<(&str, &str, &str)> = vec![(ADMIN_EMAIL, "Administrator", "admin")];
        if environment.seeds_sample_data() {
            users.push(("contributor@lumen.local", "Sample Contributor", "editor"));
        }

        for (email, name, role) in users {
            insert_if_absent(
                handle,
                &mut report,
                email,
                "SELECT id FROM users WHERE email = ?1",
                vec![SqlParam::from(email)],
                "INSERT INTO users (id, email, name, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                vec![
                    SqlParam::from(new_id()),
                    SqlParam::from(email),
                    SqlParam::from(name),
                    SqlParam::from(role),
                    SqlParam::from(Utc::now()),
                ],
            )
            .await;
        }

        log_table(self.table(), &report);
        report
    }
}

/// Seeds sample teachings. Development only.
pub struct TeachingsSeeder;

const SAMPLE_TEACHINGS: &[(&str, &str, &str)] = &[
    (
        "foundations-of-stillness",
        "Foundations of Stillness",
        "An introduction to the practice of sitting quietly.",
    ),
    (
        "working-with-thought",
        "Working with Thought",
        "Observing the movement of thought without following it.",
    ),
    (
        "attention-and-presence",
        "Attention and Presence",
        "Bringing sustained attention into everyday activity.",
    ),
];

#[async_trait::async_trait]
impl Seeder for TeachingsSeeder {
    fn table(&self) -> &str {
        "teachings"
    }

    async fn seed(&self, handle: &dyn DatabaseHandle, environment: Environment) -> TableSeedReport {
        let mut report = TableSeedReport::default();

        if !environment.seeds_sample_data() {
            debug!(table = %self.table(), environment = %environment, "Skipping sample data");
            return report;
        }

        for (slug, title, summary) in SAMPLE_TEACHINGS {
            insert_if_absent(
                handle,
                &mut report,
                slug,
                "SELECT id FROM teachings WHERE slug = ?1",
                vec![SqlParam::from(*slug)],
                "INSERT INTO teachings (id, slug, title, summary, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                vec![
                    SqlParam::from(new_id()),
                    SqlParam::from(*slug),
                    SqlParam::from(*title),
                    SqlParam::from(*summary),
                    SqlParam::from(Utc::now()),
                ],
            )
            .await;
        }

        log_table(self.table(), &report);
        report
    }
}

/// Seeds sample events. Development only.
pub struct EventsSeeder;

const SAMPLE_EVENTS: &[(&str, &str, &str, &str)] = &[
    (
        "spring-retreat",
        "Spring Retreat",
        "Mountain Center",
        "2026-04-18T09:00:00Z",
    ),
    (
        "weekly-sitting-group",
        "Weekly Sitting Group",
        "Community Hall",
        "2026-01-06T19:00:00Z",
    ),
];

#[async_trait::async_trait]
impl Seeder for EventsSeeder {
    fn table(&self) -> &str {
        "events"
    }

    async fn seed(&self, handle: &dyn DatabaseHandle, environment: Environment) -> TableSeedReport {
        let mut report = TableSeedReport::default();

        if !environment.seeds_sample_data() {
            debug!(table = %self.table(), environment = %environment, "Skipping sample data");
            return report;
        }

        for (slug, title, location, starts_at) in SAMPLE_EVENTS {
            insert_if_absent(
                handle,
                &mut report,
                slug,
                "SELECT id FROM events WHERE slug = ?1",
                vec![SqlParam::from(*slug)],
                "INSERT INTO events (id, slug, title, location, starts_at, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                vec![
                    SqlParam::from(new_id()),
                    SqlParam::from(*slug),
                    SqlParam::from(*title),
                    SqlParam::from(*location),
                    SqlParam::from(*starts_at),
                    SqlParam::from(Utc::now()),
                ],
            )
            .await;
        }

        log_table(self.table(), &report);
        report
    }
}

/// Seeds sample quotes. Development only.
pub struct QuotesSeeder;

const SAMPLE_QUOTES: &[(&str, &str, &str)] = &[
    (
        "quote-stillness",
        "Stillness is not the absence of movement but the absence of resistance.",
        "Anonymous",
    ),
    (
        "quote-attention",
        "Where attention goes, life follows.",
        "Anonymous",
    ),
    (
        "quote-beginning",
        "Every sitting is a first sitting.",
        "Anonymous",
    ),
];

#[async_trait::async_trait]
impl Seeder for QuotesSeeder {
    fn table(&self) -> &str {
        "quotes"
    }

    async fn seed(&self, handle: &dyn DatabaseHandle, environment: Environment) -> TableSeedReport {
        let mut report = TableSeedReport::default();

        if !environment.seeds_sample_data() {
            debug!(table = %self.table(), environment = %environment, "Skipping sample data");
            return report;
        }

        for (content_key, body, attribution) in SAMPLE_QUOTES {
            insert_if_absent(
                handle,
                &mut report,
                content_key,
                "SELECT id FROM quotes WHERE content_key = ?1",
                vec![SqlParam::from(*content_key)],
                "INSERT INTO quotes (id, content_key, body, attribution, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                vec![
                    SqlParam::from(new_id()),
                    SqlParam::from(*content_key),
                    SqlParam::from(*body),
                    SqlParam::from(*attribution),
                    SqlParam::from(Utc::now()),
                ],
            )
            .await;
        }

        log_table(self.table(), &report);
        report
    }
}

/// Seeds sample newsletters. Development only.
pub struct NewslettersSeeder;

const SAMPLE_NEWSLETTERS: &[(&str, &str, &str)] = &[
    (
        "welcome-edition",
        "Welcome to the Newsletter",
        "What to expect from these mailings.",
    ),
    (
        "retreat-announcement",
        "Spring Retreat Announcement",
        "Details and registration for the spring retreat.",
    ),
];

#[async_trait::async_trait]
impl Seeder for NewslettersSeeder {
    fn table(&self) -> &str {
        "newsletters"
    }

    async fn seed(&self, handle: &dyn DatabaseHandle, environment: Environment) -> TableSeedReport {
        let mut report = TableSeedReport::default();

        if !environment.seeds_sample_data() {
            debug!(table = %self.table(), environment = %environment, "Skipping sample data");
            return report;
        }

        for (slug, subject, body) in SAMPLE_NEWSLETTERS {
            insert_if_absent(
                handle,
                &mut report,
                slug,
                "SELECT id FROM newsletters WHERE slug = ?1",
                vec![SqlParam::from(*slug)],
                "INSERT INTO newsletters (id, slug, subject, body, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                vec![
                    SqlParam::from(new_id()),
                    SqlParam::from(*slug),
                    SqlParam::from(*subject),
                    SqlParam::from(*body),
                    SqlParam::from(Utc::now()),
                ],
            )
            .await;
        }

        log_table(self.table(), &report);
        report
    }
}

/// Seeds sample media entries. Development only.
///
/// Media rows are owned by the admin user, so this seeder must run after
/// [`UsersSeeder`].
pub struct MediaSeeder;

const SAMPLE_MEDIA: &[(&str, &str)] = &[
    ("audio/foundations-of-stillness.mp3", "Foundations of Stillness (audio)"),
    ("images/retreat-center.jpg", "Retreat center"),
];

#[async_trait::async_trait]
impl Seeder for MediaSeeder {
    fn table(&self) -> &str {
        "media"
    }

    async fn seed(&self, handle: &dyn DatabaseHandle, environment: Environment) -> TableSeedReport {
        let mut report = TableSeedReport::default();

        if !environment.seeds_sample_data() {
            debug!(table = %self.table(), environment = %environment, "Skipping sample data");
            return report;
        }

        let owner_id = match handle
            .query_optional(
                "SELECT id FROM users WHERE email = ?1",
                vec![SqlParam::from(ADMIN_EMAIL)],
            )
            .await
        {
            Ok(Some(row)) => match row["id"].as_str() {
                Some(id) => id.to_string(),
                None => {
                    report
                        .errors
                        .push("admin user row has no id column".to_string());
                    return report;
                }
            },
            Ok(None) => {
                report
                    .errors
                    .push("admin user not found; media ownership cannot be resolved".to_string());
                return report;
            }
            Err(e) => {
                report.errors.push(format!("admin lookup failed: {}", e));
                return report;
            }
        };

        for (path, title) in SAMPLE_MEDIA {
            insert_if_absent(
                handle,
                &mut report,
                path,
                "SELECT id FROM media WHERE path = ?1",
                vec![SqlParam::from(*path)],
                "INSERT INTO media (id, path, title, owner_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                vec![
                    SqlParam::from(new_id()),
                    SqlParam::from(*path),
                    SqlParam::from(*title),
                    SqlParam::from(owner_id.as_str()),
                    SqlParam::from(Utc::now()),
                ],
            )
            .await;
        }

        log_table(self.table(), &report);
        report
    }
}
