//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lumen CLI - Database lifecycle management
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(version)]
#[command(about = "Lumen CLI - Database lifecycle management", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "lumen.toml")]
    pub config: PathBuf,

    /// Database connection URL (overrides config and DATABASE_URL)
    #[arg(short, long, global = true, env = "DATABASE_URL")]
    pub url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Migrate and seed in one pass
    Init(InitArgs),

    /// Apply pending migrations
    Migrate,

    /// Seed reference data
    Seed(SeedArgs),

    /// Show migration status
    Status,

    /// Validate ledger integrity against registered migrations
    Validate,

    /// Roll back the most recently applied migration
    Rollback(RollbackArgs),

    /// Probe database health
    Health,

    /// Show row counts and migration totals
    Stats,
}

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Seed essential records only (no sample data)
    #[arg(short, long)]
    pub production: bool,

    /// Skip the seeding phase
    #[arg(long)]
    pub skip_seed: bool,
}

/// Arguments for the `seed` command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Seed essential records only (no sample data)
    #[arg(short, long)]
    pub production: bool,
}

/// Arguments for the `rollback` command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Confirm the rollback; without this flag nothing runs
    #[arg(short, long)]
    pub force: bool,
}
