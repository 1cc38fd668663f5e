//! Lumen CLI - Command-line interface for Lumen database management.
//!
//! This crate provides the CLI tool for operating a Lumen database,
//! including migrations, seeding, validation, and health checks.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
