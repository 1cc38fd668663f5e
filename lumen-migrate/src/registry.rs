//! In-memory migration catalog.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::{MigrateResult, MigrationError};
use crate::ledger::MigrationRecord;
use crate::migration::Migration;

/// Strategy for ordering migration versions.
///
/// Raw string comparison orders `"10.0.0"` before `"2.0.0"`.
/// [`VersionOrdering::Numeric`] avoids that by comparing dotted segments
/// numerically; [`VersionOrdering::Lexicographic`] keeps the byte-wise
/// comparison for ledgers that were built under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionOrdering {
    /// Compare dotted numeric segments (`2.0.0 < 10.0.0`).
    #[default]
    Numeric,
    /// Compare versions as raw strings (`10.0.0 < 2.0.0`).
    Lexicographic,
}

impl VersionOrdering {
    /// Compare two version strings under this strategy.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexicographic => a.cmp(b),
            Self::Numeric => compare_numeric(a, b),
        }
    }
}

/// Compare dotted versions segment by segment, numerically where possible.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(xn), Ok(yn)) => xn.cmp(&yn),
                    // Non-numeric segments fall back to string order.
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// In-memory catalog of registered migrations.
///
/// Populated once at process start by bootstrap code; registration never
/// touches the database. The catalog is kept sorted ascending by version
/// under the configured [`VersionOrdering`].
pub struct MigrationRegistry {
    migrations: Vec<Arc<dyn Migration>>,
    ordering: VersionOrdering,
}

impl MigrationRegistry {
    /// Create an empty registry with numeric version ordering.
    pub fn new() -> Self {
        Self::with_ordering(VersionOrdering::default())
    }

    /// Create an empty registry with the given ordering strategy.
    pub fn with_ordering(ordering: VersionOrdering) -> Self {
        Self {
            migrations: Vec::new(),
            ordering,
        }
    }

    /// The ordering strategy in effect.
    pub fn ordering(&self) -> VersionOrdering {
        self.ordering
    }

    /// Register a migration.
    ///
    /// Rejects duplicate names and duplicate versions outright; on conflict
    /// the registry is left unchanged.
    pub fn register(&mut self, migration: Arc<dyn Migration>) -> MigrateResult<()> {
        if self.get(migration.name()).is_some() {
            return Err(MigrationError::DuplicateName(migration.name().to_string()));
        }

        if let Some(existing) = self
            .migrations
            .iter()
            .find(|m| m.version() == migration.version())
        {
            return Err(MigrationError::DuplicateVersion {
                version: migration.version().to_string(),
                existing: existing.name().to_string(),
                incoming: migration.name().to_string(),
            });
        }

        self.migrations.push(migration);
        let ordering = self.ordering;
        self.migrations
            .sort_by(|a, b| ordering.compare(a.version(), b.version()));

        Ok(())
    }

    /// Look up a registered migration by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Migration>> {
        self.migrations.iter().find(|m| m.name() == name)
    }

    /// All registered migrations, ascending by version.
    pub fn all(&self) -> &[Arc<dyn Migration>] {
        &self.migrations
    }

    /// Number of registered migrations.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Registered migrations with no ledger record, ascending by version.
    pub fn pending(&self, executed: &[MigrationRecord]) -> Vec<Arc<dyn Migration>> {
        self.migrations
            .iter()
            .filter(|m| !executed.iter().any(|r| r.name == m.name()))
            .cloned()
            .collect()
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::SqlMigration;

    fn migration(name: &str, version: &str) -> Arc<dyn Migration> {
        Arc::new(SqlMigration::new(name, version, "", "SELECT 1;", "SELECT 1;"))
    }

    #[test]
    fn test_register_rejects_duplicate_name() {
        let mut registry = MigrationRegistry::new();
        registry.register(migration("a", "1.0.0")).unwrap();

        let err = registry.register(migration("a", "2.0.0")).unwrap_err();
        assert!(matches!(err, MigrationError::DuplicateName(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_rejects_duplicate_version() {
        let mut registry = MigrationRegistry::new();
        registry.register(migration("a", "1.0.0")).unwrap();

        let err = registry.register(migration("b", "1.0.0")).unwrap_err();
        assert!(matches!(err, MigrationError::DuplicateVersion { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registration_sorts_by_version() {
        let mut registry = MigrationRegistry::new();
        registry.register(migration("a", "2.0.0")).unwrap();
        registry.register(migration("b", "1.0.0")).unwrap();

        let names: Vec<_> = registry.all().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_numeric_ordering_handles_double_digits() {
        let mut registry = MigrationRegistry::new();
        registry.register(migration("ten", "10.0.0")).unwrap();
        registry.register(migration("two", "2.0.0")).unwrap();

        let names: Vec<_> = registry.all().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["two", "ten"]);
    }

    #[test]
    fn test_lexicographic_ordering_preserved_when_requested() {
        let mut registry = MigrationRegistry::with_ordering(VersionOrdering::Lexicographic);
        registry.register(migration("ten", "10.0.0")).unwrap();
        registry.register(migration("two", "2.0.0")).unwrap();

        let names: Vec<_> = registry.all().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["ten", "two"]);
    }

    #[test]
    fn test_pending_filters_executed_names() {
        let mut registry = MigrationRegistry::new();
        registry.register(migration("a", "1.0.0")).unwrap();
        registry.register(migration("b", "2.0.0")).unwrap();

        let record = MigrationRecord {
            id: "r1".to_string(),
            name: "a".to_string(),
            version: "1.0.0".to_string(),
            description: String::new(),
            executed_at: chrono::Utc::now(),
            checksum: "x".to_string(),
        };

        let pending = registry.pending(&[record]);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name(), "b");
    }

    #[test]
    fn test_compare_numeric_prefix() {
        assert_eq!(compare_numeric("1.0", "1.0.1"), Ordering::Less);
        assert_eq!(compare_numeric("1.0.0", "1.0.0"), Ordering::Equal);
    }
}
