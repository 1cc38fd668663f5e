//! The application's migration catalog.
//!
//! Bootstrap code builds the registry once at process start and hands it to
//! the engine; nothing here touches the database.

use std::sync::Arc;

use lumen_migrate::{MigrateResult, MigrationRegistry, SqlMigration};

/// Application tables, in seeding order.
pub const APP_TABLES: &[&str] = &[
    "users",
    "teachings",
    "events",
    "quotes",
    "newsletters",
    "media",
];

const INITIAL_SCHEMA_UP: &str = "\
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

CREATE TABLE quotes (
    id TEXT PRIMARY KEY,
    content_key TEXT UNIQUE NOT NULL,
    body TEXT NOT NULL,
    attribution TEXT,
    created_at TEXT NOT NULL
);
";

const INITIAL_SCHEMA_DOWN: &str = "\
DROP TABLE quotes;
DROP TABLE events;
DROP TABLE teachings;
DROP TABLE users;
";

const MEDIA_LIBRARY_UP: &str = "\
CREATE TABLE media (
    id TEXT PRIMARY KEY,
    path TEXT UNIQUE NOT NULL,
    title TEXT,
    owner_id TEXT NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL
);

CREATE INDEX media_owner_idx ON media (owner_id);
";

const MEDIA_LIBRARY_DOWN: &str = "DROP TABLE media;";

const NEWSLETTERS_UP: &str = "\
CREATE TABLE newsletters (
    id TEXT PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    subject TEXT NOT NULL,
    body TEXT,
    created_at TEXT NOT NULL
);
";

const NEWSLETTERS_DOWN: &str = "DROP TABLE newsletters;";

/// Build the registry of application migrations.
pub fn catalog() -> MigrateResult<MigrationRegistry> {
    let mut registry = MigrationRegistry::new();

    registry.register(Arc::new(SqlMigration::new(
        "initial_schema",
        "1.0.0",
        "Create users, teachings, events, and quotes tables",
        INITIAL_SCHEMA_UP,
        INITIAL_SCHEMA_DOWN,
    )))?;

    registry.register(Arc::new(SqlMigration::new(
        "add_media_library",
        "1.1.0",
        "Create the media table owned by users",
        MEDIA_LIBRARY_UP,
        MEDIA_LIBRARY_DOWN,
    )))?;

    registry.register(Arc::new(SqlMigration::new(
        "add_newsletters",
        "1.2.0",
        "Create the newsletters table",
        NEWSLETTERS_UP,
        NEWSLETTERS_DOWN,
    )))?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_registers_in_version_order() {
        let registry = catalog().unwrap();
        assert_eq!(registry.len(), 3);

        let versions: Vec<_> = registry
            .all()
            .iter()
            .map(|m| m.version().to_string())
            .collect();
        assert_eq!(versions, vec!["1.0.0", "1.1.0", "1.2.0"]);
    }

    #[test]
    fn test_catalog_covers_all_app_tables() {
        let ddl: String = [INITIAL_SCHEMA_UP, MEDIA_LIBRARY_UP, NEWSLETTERS_UP].concat();
        for table in APP_TABLES {
            assert!(
                ddl.contains(&format!("CREATE TABLE {}", table)),
                "missing table {}",
                table
            );
        }
    }
}
