//! Lumen CLI - Command-line interface for Lumen database management.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lumen_cli::cli::{Cli, Command};
use lumen_cli::commands;
use lumen_cli::config::Config;
use lumen_cli::error::CliResult;
use lumen_cli::output;

#[tokio::main]
async fn main() {
    // Run the CLI and handle errors
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config::load_or_default(&cli.config)?;
    let url = cli.url.as_deref();

    // Run the appropriate command
    match cli.command {
        Command::Init(args) => commands::init::run(args, &config, url).await,
        Command::Migrate => commands::migrate::run(&config, url).await,
        Command::Seed(args) => commands::seed::run(args, &config, url).await,
        Command::Status => commands::status::run(&config, url).await,
        Command::Validate => commands::validate::run(&config, url).await,
        Command::Rollback(args) => commands::rollback::run(args, &config, url).await,
        Command::Health => commands::health::run(&config, url).await,
        Command::Stats => commands::stats::run(&config, url).await,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
