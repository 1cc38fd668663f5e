//! `lumen init` - migrate and seed in one pass.

use lumen::{initialize_database, InitOptions};

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the init command
pub async fn run(args: InitArgs, config: &Config, url: Option<&str>) -> CliResult<()> {
    output::header("Initialize");

    let environment = super::resolve_environment(args.production, config)?;
    output::kv("Environment", &environment.to_string());
    output::newline();

    let ctx = super::connect(config, url).await?;
    let options = InitOptions {
        run_migrations: true,
        run_seeding: !args.skip_seed,
        environment,
        engine: super::engine_config(config),
    };

    let result = initialize_database(ctx.handle, ctx.registry, options).await?;

    output::list("Migrations:");
    super::migrate::print_result(&result.migrations);
    output::newline();

    match &result.seeding {
        Some(report) => {
            output::list("Seeding:");
            super::seed::print_report(report);
        }
        None if args.skip_seed => output::info("Seeding skipped (--skip-seed)"),
        None => output::warn("Seeding skipped: migrations failed"),
    }

    output::newline();
    if result.success {
        output::success("Database initialized");
        Ok(())
    } else {
        Err(CliError::Command("initialization failed".to_string()))
    }
}
