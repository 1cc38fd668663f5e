//! Checksum-based integrity validation.

use sha2::{Digest, Sha256};

use crate::ledger::MigrationRecord;
use crate::migration::Migration;
use crate::registry::MigrationRegistry;

/// Compute the content fingerprint of a migration.
///
/// SHA-256 over name, version, and description. Detects drift between a
/// registered migration and what was recorded at execution time; it is not a
/// tamper-proof signature of the migration's SQL.
pub fn checksum(migration: &dyn Migration) -> String {
    let mut hasher = Sha256::new();
    hasher.update(migration.name().as_bytes());
    hasher.update(b"\n");
    hasher.update(migration.version().as_bytes());
    hasher.update(b"\n");
    hasher.update(migration.description().as_bytes());
    hex::encode(hasher.finalize())
}

/// Outcome of an integrity validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// True iff no issues were found.
    pub valid: bool,
    /// Human-readable descriptions of every issue found.
    pub issues: Vec<String>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

/// Validate the ledger against the registry.
///
/// Reports orphaned records (no registered migration of that name), checksum
/// mismatches, and duplicate registered versions. Issues are reported, never
/// repaired.
pub fn validate(registry: &MigrationRegistry, records: &[MigrationRecord]) -> ValidationReport {
    let mut issues = Vec::new();

    for record in records {
        match registry.get(&record.name) {
            None => issues.push(format!(
                "record '{}' is orphaned: no matching registered migration",
                record.name
            )),
            Some(migration) => {
                let current = checksum(migration.as_ref());
                if current != record.checksum {
                    issues.push(format!(
                        "checksum mismatch for '{}': recorded {}, recomputed {}",
                        record.name, record.checksum, current
                    ));
                }
            }
        }
    }

    // The registry rejects duplicate versions at registration time, but a
    // registry assembled elsewhere may not have; scan independently.
    let all = registry.all();
    for (i, a) in all.iter().enumerate() {
        for b in all.iter().skip(i + 1) {
            if a.version() == b.version() {
                issues.push(format!(
                    "duplicate version '{}' registered by '{}' and '{}'",
                    a.version(),
                    a.name(),
                    b.name()
                ));
            }
        }
    }

    ValidationReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::migration::SqlMigration;

    fn migration(name: &str, version: &str, description: &str) -> Arc<dyn Migration> {
        Arc::new(SqlMigration::new(
            name,
            version,
            description,
            "SELECT 1;",
            "SELECT 1;",
        ))
    }

    fn record_for(m: &Arc<dyn Migration>) -> MigrationRecord {
        MigrationRecord {
            id: "r1".to_string(),
            name: m.name().to_string(),
            version: m.version().to_string(),
            description: m.description().to_string(),
            executed_at: chrono::Utc::now(),
            checksum: checksum(m.as_ref()),
        }
    }

    #[test]
    fn test_checksum_is_deterministic() {
        let a = migration("a", "1.0.0", "first");
        let b = migration("a", "1.0.0", "first");
        assert_eq!(checksum(a.as_ref()), checksum(b.as_ref()));
    }

    #[test]
    fn test_checksum_changes_with_content() {
        let a = migration("a", "1.0.0", "first");
        let b = migration("a", "1.0.0", "second");
        assert_ne!(checksum(a.as_ref()), checksum(b.as_ref()));
    }

    #[test]
    fn test_validate_clean() {
        let mut registry = MigrationRegistry::new();
        let m = migration("a", "1.0.0", "first");
        registry.register(m.clone()).unwrap();

        let report = validate(&registry, &[record_for(&m)]);
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_validate_reports_orphaned_record() {
        let registry = MigrationRegistry::new();
        let m = migration("gone", "1.0.0", "");

        let report = validate(&registry, &[record_for(&m)]);
        assert!(!report.valid);
        assert!(report.issues[0].contains("orphaned"));
    }

    #[test]
    fn test_validate_reports_checksum_mismatch() {
        let mut registry = MigrationRegistry::new();
        let original = migration("a", "1.0.0", "original");
        let record = record_for(&original);

        // Same name, edited description: the recomputed checksum drifts.
        registry.register(migration("a", "1.0.0", "edited")).unwrap();

        let report = validate(&registry, &[record]);
        assert!(!report.valid);
        assert!(report.issues[0].contains("checksum mismatch"));
    }
}
