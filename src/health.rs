//! Database health probes.

use std::sync::Arc;

use lumen_db::DatabaseHandle;
use lumen_migrate::{MigrationEngine, MigrationRegistry, LEDGER_TABLE};
use tracing::{debug, warn};

use crate::catalog::APP_TABLES;

/// One named probe and its verdict.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    /// Probe name.
    pub name: String,
    /// Whether the probe passed.
    pub healthy: bool,
    /// Human-readable detail.
    pub detail: String,
}

impl HealthCheck {
    fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            healthy: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            healthy: false,
            detail: detail.into(),
        }
    }
}

/// Aggregated health verdict.
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// True only when every probe passed.
    pub healthy: bool,
    /// Individual probe results.
    pub checks: Vec<HealthCheck>,
}

/// Probe database health: connectivity, expected tables, pending migrations.
///
/// Probes never abort the report; each failure is captured as an unhealthy
/// check and the remaining probes still run.
pub async fn check_database_health(
    handle: Arc<dyn DatabaseHandle>,
    registry: Arc<MigrationRegistry>,
) -> HealthReport {
    let mut checks = Vec::new();

    checks.push(connectivity_check(handle.as_ref()).await);
    checks.push(tables_check(handle.as_ref()).await);
    checks.push(pending_check(handle.clone(), registry).await);

    let healthy = checks.iter().all(|c| c.healthy);
    if healthy {
        debug!("Database healthy");
    } else {
        warn!(
            failing = checks.iter().filter(|c| !c.healthy).count(),
            "Database unhealthy"
        );
    }

    HealthReport { healthy, checks }
}

async fn connectivity_check(handle: &dyn DatabaseHandle) -> HealthCheck {
    match handle.query("SELECT 1", vec![]).await {
        Ok(_) => HealthCheck::pass("connectivity", "database reachable"),
        Err(e) => HealthCheck::fail("connectivity", format!("query failed: {}", e)),
    }
}

async fn tables_check(handle: &dyn DatabaseHandle) -> HealthCheck {
    let mut missing = Vec::new();

    for table in std::iter::once(&LEDGER_TABLE).chain(APP_TABLES) {
        let probe = format!("SELECT 1 FROM {} LIMIT 1", table);
        if handle.query(&probe, vec![]).await.is_err() {
            missing.push(*table);
        }
    }

    if missing.is_empty() {
        HealthCheck::pass("tables", "all expected tables present")
    } else {
        HealthCheck::fail("tables", format!("missing tables: {}", missing.join(", ")))
    }
}

async fn pending_check(
    handle: Arc<dyn DatabaseHandle>,
    registry: Arc<MigrationRegistry>,
) -> HealthCheck {
    match MigrationEngine::new(handle, registry).status().await {
        Ok(status) if status.pending == 0 => {
            HealthCheck::pass("migrations", format!("{} executed, none pending", status.executed))
        }
        Ok(status) => HealthCheck::fail(
            "migrations",
            format!("{} migrations pending", status.pending),
        ),
        Err(e) => HealthCheck::fail("migrations", format!("status unavailable: {}", e)),
    }
}
