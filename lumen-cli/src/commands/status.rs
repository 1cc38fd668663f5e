//! `lumen status` - show migration status.

use lumen_migrate::MigrationEngine;

use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the status command
pub async fn run(config: &Config, url: Option<&str>) -> CliResult<()> {
    output::header("Migration Status");

    let ctx = super::connect(config, url).await?;
    let status = MigrationEngine::new(ctx.handle, ctx.registry)
        .status()
        .await?;

    output::kv("Registered", &status.total.to_string());
    output::kv("Executed", &status.executed.to_string());
    output::kv("Pending", &status.pending.to_string());
    output::newline();

    if let Some(last) = &status.last_executed {
        output::kv(
            "Last executed",
            &format!("{} ({}) at {}", last.name, last.version, last.executed_at),
        );
    }

    match &status.next_pending {
        Some(next) => {
            output::kv(
                "Next pending",
                &output::style_pending(&format!("{} ({})", next.name, next.version)),
            );
        }
        None => {
            output::newline();
            output::success("Database is up to date");
        }
    }

    Ok(())
}
