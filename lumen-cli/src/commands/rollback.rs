//! `lumen rollback` - roll back the last applied migration.

use lumen_migrate::MigrationEngine;

use crate::cli::RollbackArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the rollback command
pub async fn run(args: RollbackArgs, config: &Config, url: Option<&str>) -> CliResult<()> {
    // Refuse before touching the database at all.
    if !args.force {
        return Err(CliError::Command(
            "rollback is destructive; re-run with --force to confirm".to_string(),
        ));
    }

    output::header("Rollback");

    let ctx = super::connect(config, url).await?;
    let result =
        MigrationEngine::with_config(ctx.handle, ctx.registry, super::engine_config(config))
            .rollback_last()
            .await?;

    super::migrate::print_result(&result);
    output::newline();

    if !result.success {
        return Err(CliError::Migration(result.summary()));
    }

    if result.migrations_run == 0 {
        output::info("Nothing to roll back");
    } else {
        output::success("Rolled back 1 migration");
    }
    Ok(())
}
