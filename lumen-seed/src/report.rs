//! Seeding result types.

use std::collections::BTreeMap;

use serde::Serialize;

/// Outcome of seeding a single table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSeedReport {
    /// Records inserted in this run.
    pub inserted: usize,
    /// Records skipped because their natural key already existed.
    pub skipped: usize,
    /// Per-record failures. A failing record never aborts its siblings.
    pub errors: Vec<String>,
}

impl TableSeedReport {
    /// Whether this table seeded without errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Aggregated outcome of a full seeding run.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// True iff no table reported any error.
    pub success: bool,
    /// Per-table results, keyed by table name.
    pub results: BTreeMap<String, TableSeedReport>,
}

impl SeedReport {
    /// Build a report from per-table results, deriving `success`.
    pub fn from_results(results: BTreeMap<String, TableSeedReport>) -> Self {
        let success = results.values().all(TableSeedReport::is_clean);
        Self { success, results }
    }

    /// Total records inserted across all tables.
    pub fn total_inserted(&self) -> usize {
        self.results.values().map(|r| r.inserted).sum()
    }

    /// Total records skipped across all tables.
    pub fn total_skipped(&self) -> usize {
        self.results.values().map(|r| r.skipped).sum()
    }

    /// All errors across all tables, prefixed with the table name.
    pub fn all_errors(&self) -> Vec<String> {
        self.results
            .iter()
            .flat_map(|(table, r)| {
                r.errors
                    .iter()
                    .map(move |e| format!("{}: {}", table, e))
            })
            .collect()
    }
}
