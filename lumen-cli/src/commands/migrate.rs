//! `lumen migrate` - apply pending migrations.

use lumen_migrate::{MigrationEngine, MigrationResult, StepOutcome};

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the migrate command
pub async fn run(config: &Config, url: Option<&str>) -> CliResult<()> {
    output::header("Migrate");

    let ctx = super::connect(config, url).await?;
    let engine =
        MigrationEngine::with_config(ctx.handle, ctx.registry, super::engine_config(config));

    let result = engine.run().await?;
    print_result(&result);

    if result.success {
        output::newline();
        output::success(&result.summary());
        Ok(())
    } else {
        Err(CliError::Migration(result.summary()))
    }
}

/// Print per-migration details for a run or rollback.
pub(crate) fn print_result(result: &MigrationResult) {
    for detail in &result.details {
        let label = format!("{} ({})", detail.name, detail.version);
        let line = match detail.outcome {
            StepOutcome::Success => format!(
                "{} applied in {}ms",
                output::style_success(&label),
                detail.duration_ms
            ),
            StepOutcome::RolledBack => format!(
                "{} rolled back in {}ms",
                output::style_pending(&label),
                detail.duration_ms
            ),
            StepOutcome::Failed => format!(
                "{} failed: {}",
                output::style_error(&label),
                detail.message.as_deref().unwrap_or("unknown error")
            ),
        };
        output::list_item(&line);
    }
}
