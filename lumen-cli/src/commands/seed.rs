//! `lumen seed` - seed reference data.

use lumen_seed::{SeedEngine, SeedReport};

use crate::cli::SeedArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the seed command
pub async fn run(args: SeedArgs, config: &Config, url: Option<&str>) -> CliResult<()> {
    output::header("Seed");

    let environment = super::resolve_environment(args.production, config)?;
    output::kv("Environment", &environment.to_string());
    output::newline();

    let ctx = super::connect(config, url).await?;
    let report = SeedEngine::new(ctx.handle).seed(environment).await;
    print_report(&report);

    if report.success {
        output::newline();
        output::success(&format!(
            "{} inserted, {} skipped",
            report.total_inserted(),
            report.total_skipped()
        ));
        Ok(())
    } else {
        Err(CliError::Seed(report.all_errors().join("; ")))
    }
}

/// Print per-table seeding results.
pub(crate) fn print_report(report: &SeedReport) {
    for (table, result) in &report.results {
        if result.is_clean() {
            output::list_item(&format!(
                "{}: {} inserted, {} skipped",
                table, result.inserted, result.skipped
            ));
        } else {
            output::list_item(&output::style_error(&format!(
                "{}: {} errors",
                table,
                result.errors.len()
            )));
            for error in &result.errors {
                output::dim(&format!("      {}", error));
            }
        }
    }
}
