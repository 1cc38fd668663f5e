//! `lumen health` - probe database health.

use lumen::check_database_health;

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the health command
pub async fn run(config: &Config, url: Option<&str>) -> CliResult<()> {
    output::header("Health");

    let ctx = super::connect(config, url).await?;
    let report = check_database_health(ctx.handle, ctx.registry).await;

    for check in &report.checks {
        let line = format!("{}: {}", check.name, check.detail);
        if check.healthy {
            output::list_item(&output::style_success(&line));
        } else {
            output::list_item(&output::style_error(&line));
        }
    }
    output::newline();

    if report.healthy {
        output::success("Database is healthy");
        Ok(())
    } else {
        Err(CliError::Database("health check failed".to_string()))
    }
}
