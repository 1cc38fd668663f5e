//! `lumen validate` - check ledger integrity.

use lumen_migrate::MigrationEngine;

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the validate command
pub async fn run(config: &Config, url: Option<&str>) -> CliResult<()> {
    output::header("Validate");

    let ctx = super::connect(config, url).await?;
    let report = MigrationEngine::new(ctx.handle, ctx.registry)
        .validate()
        .await?;

    if report.valid {
        output::success("Ledger is consistent with registered migrations");
        return Ok(());
    }

    output::list(&format!("{} issues found:", report.issues.len()));
    for issue in &report.issues {
        output::list_item(&output::style_error(issue));
    }

    Err(CliError::Migration(format!(
        "ledger validation failed with {} issues",
        report.issues.len()
    )))
}
