//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::CONFIG_ENV_VAR;

/// cachesweep - Remove stale entries from build and tool caches.
#[derive(Debug, Parser)]
#[command(name = "cachesweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides the default location)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Delete cache entries older than each store's maximum age
    Clean(CleanArgs),

    /// List configured cache stores and their cutoffs
    Stores(StoresArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `clean` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CleanArgs {
    /// Only clean the named store (repeatable)
    #[arg(short, long = "store", value_name = "NAME")]
    pub stores: Vec<String>,

    /// Report what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Delete even when the config enables `dry_run`
    #[arg(long, conflicts_with = "dry_run")]
    pub no_dry_run: bool,

    /// Override the maximum age (in days) for every selected store
    #[arg(long, value_name = "DAYS", allow_negative_numbers = true)]
    pub max_age_days: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stores` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StoresArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
