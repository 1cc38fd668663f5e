//! End-to-end initialization against in-memory SQLite.

use std::sync::Arc;

use lumen::{
    catalog, check_database_health, database_stats, initialize_database, InitOptions,
};
use lumen_db::{DatabaseHandle, SqliteHandle};
use lumen_migrate::{MigrationRegistry, SqlMigration};
use lumen_seed::Environment;
use pretty_assertions::assert_eq;

async fn memory_handle() -> Arc<dyn DatabaseHandle> {
    Arc::new(SqliteHandle::open_in_memory().await.unwrap())
}

#[tokio::test]
async fn initialize_migrates_then_seeds() {
    let handle = memory_handle().await;
    let registry = Arc::new(catalog::catalog().unwrap());

    let result = initialize_database(handle.clone(), registry, InitOptions::default())
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.errors.is_empty());
    assert!(result.migrations.success);
    assert_eq!(result.migrations.migrations_run, 3);

    let seeding = result.seeding.expect("seeding phase should have run");
    assert!(seeding.success);
    assert!(seeding.total_inserted() > 0);

    // Seeded data landed in the migrated schema.
    let users = handle.query("SELECT id FROM users", vec![]).await.unwrap();
    assert!(!users.is_empty());
}

#[tokio::test]
async fn initialize_is_idempotent() {
    let handle = memory_handle().await;
    let registry = Arc::new(catalog::catalog().unwrap());

    initialize_database(handle.clone(), registry.clone(), InitOptions::default())
        .await
        .unwrap();
    let second = initialize_database(handle, registry, InitOptions::default())
        .await
        .unwrap();

    assert!(second.success);
    assert_eq!(second.migrations.migrations_run, 0);
    assert_eq!(second.seeding.unwrap().total_inserted(), 0);
}

#[tokio::test]
async fn failed_migrations_skip_seeding() {
    let handle = memory_handle().await;

    let mut registry = MigrationRegistry::new();
    registry
        .register(Arc::new(SqlMigration::new(
            "broken",
            "1.0.0",
            "Does not parse",
            "THIS IS NOT SQL;",
            "",
        )))
        .unwrap();

    let result = initialize_database(handle, Arc::new(registry), InitOptions::default())
        .await
        .unwrap();

    assert!(!result.success);
    assert!(!result.migrations.success);
    assert!(result.seeding.is_none());
}

// The application schema minus the quotes table, to force a seed-phase
// failure after a clean migration run.
const PARTIAL_SCHEMA: &str = "\
CREATE TABLE users (
    id TEXT PRIMARY KEY,
    email TEXT UNIQUE NOT NULL,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE teachings (
    id TEXT PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    title TEXT NOT NULL,
    summary TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE events (
    id TEXT PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    title TEXT NOT NULL,
    location TEXT,
    starts_at TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE newsletters (
    id TEXT PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    subject TEXT NOT NULL,
    body TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE media (
    id TEXT PRIMARY KEY,
    path TEXT UNIQUE NOT NULL,
    title TEXT,
    owner_id TEXT NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL
);
";

#[tokio::test]
async fn init_result_aggregates_errors_from_both_phases() {
    // A failed migration surfaces its error at the top level.
    let handle = memory_handle().await;
    let mut registry = MigrationRegistry::new();
    registry
        .register(Arc::new(SqlMigration::new(
            "broken",
            "1.0.0",
            "Does not parse",
            "THIS IS NOT SQL;",
            "",
        )))
        .unwrap();

    let result = initialize_database(handle, Arc::new(registry), InitOptions::default())
        .await
        .unwrap();
    assert!(!result.errors.is_empty());
    assert_eq!(result.errors, result.migrations.errors);

    // A failed seeder surfaces its table-prefixed errors at the top level.
    let handle = memory_handle().await;
    let mut registry = MigrationRegistry::new();
    registry
        .register(Arc::new(SqlMigration::new(
            "partial_schema",
            "1.0.0",
            "All application tables except quotes",
            PARTIAL_SCHEMA,
            "",
        )))
        .unwrap();

    let result = initialize_database(handle, Arc::new(registry), InitOptions::default())
        .await
        .unwrap();
    assert!(result.migrations.success);
    assert!(!result.success);
    assert!(result.errors.iter().any(|e| e.starts_with("quotes:")));
}

#[tokio::test]
async fn seeding_can_be_disabled() {
    let handle = memory_handle().await;
    let registry = Arc::new(catalog::catalog().unwrap());

    let options = InitOptions {
        run_seeding: false,
        ..InitOptions::default()
    };
    let result = initialize_database(handle.clone(), registry, options)
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.seeding.is_none());

    let users = handle.query("SELECT id FROM users", vec![]).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn health_reflects_pending_migrations() {
    let handle = memory_handle().await;
    let registry = Arc::new(catalog::catalog().unwrap());

    let before = check_database_health(handle.clone(), registry.clone()).await;
    assert!(!before.healthy);

    initialize_database(handle.clone(), registry.clone(), InitOptions::default())
        .await
        .unwrap();

    let after = check_database_health(handle, registry).await;
    assert!(after.healthy, "checks: {:?}", after.checks);
    assert!(after.checks.iter().all(|c| c.healthy));
}

#[tokio::test]
async fn stats_count_seeded_rows() {
    let handle = memory_handle().await;
    let registry = Arc::new(catalog::catalog().unwrap());

    let options = InitOptions {
        environment: Environment::Production,
        ..InitOptions::default()
    };
    initialize_database(handle.clone(), registry.clone(), options)
        .await
        .unwrap();

    let stats = database_stats(handle, registry).await.unwrap();
    assert_eq!(stats.tables["users"], 1);
    assert_eq!(stats.tables["media"], 0);
    assert_eq!(stats.migrations.executed, 3);
    assert_eq!(stats.migrations.pending, 0);
}

#[tokio::test]
async fn stats_tolerate_missing_tables() {
    let handle = memory_handle().await;
    let registry = Arc::new(catalog::catalog().unwrap());

    // No migrations applied: every application table is absent.
    let stats = database_stats(handle, registry).await.unwrap();
    assert_eq!(stats.total_rows(), 0);
    assert_eq!(stats.migrations.pending, 3);
}
