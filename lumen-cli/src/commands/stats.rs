//! `lumen stats` - show row counts and migration totals.

use lumen::database_stats;

use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the stats command
pub async fn run(config: &Config, url: Option<&str>) -> CliResult<()> {
    output::header("Stats");

    let ctx = super::connect(config, url).await?;
    let stats = database_stats(ctx.handle, ctx.registry).await?;

    output::list("Tables:");
    for (table, count) in &stats.tables {
        output::kv(table, &count.to_string());
    }
    output::newline();

    output::list("Migrations:");
    output::kv("Executed", &stats.migrations.executed.to_string());
    output::kv("Pending", &stats.migrations.pending.to_string());
    output::newline();

    output::kv("Total rows", &stats.total_rows().to_string());

    Ok(())
}
