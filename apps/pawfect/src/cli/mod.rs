//! # PAWfect CLI Module
//!
//! This module implements the CLI interface for PAWfect.
//!
//! ## Available Commands
//!
//! - `check` - Validate every contact form field of a page fixture
//! - `submit` - Run a whole submission against a page fixture
//! - `search` - Run the site search over a page fixture
//! - `inspect` - Show which widgets attach to a page
//! - `format-phone` - Format a phone number
//! - `sample` - Write a sample contact page fixture

mod commands;

use crate::config::RuntimeConfig;
use clap::{Parser, Subcommand};
use pawfect_core::PawfectError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// PAWfect - site widgets for a veterinary practice
///
/// Loads page fixtures and drives the contact form and the other page
/// widgets against them.
#[derive(Parser, Debug)]
#[command(name = "pawfect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file (falls back to PAWFECT_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the contact form of a page fixture
    Check {
        /// Path to the page fixture (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Submit the contact form of a page fixture
    Submit {
        /// Path to the page fixture (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Make the delivery fail
        #[arg(long)]
        fail: bool,

        /// Override the delivery latency in milliseconds
        #[arg(long)]
        latency_ms: Option<u64>,
    },

    /// Search the text of a page fixture
    Search {
        /// Path to the page fixture (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Search text
        #[arg(short = 'Q', long)]
        query: String,
    },

    /// Show the page kind and attached widgets of a page fixture
    Inspect {
        /// Path to the page fixture (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// URL path to load the page under (defaults to the fixture's path)
        #[arg(short, long)]
        path: Option<String>,

        /// Treat the map tile library as unavailable
        #[arg(long)]
        no_map: bool,
    },

    /// Format a phone number as (ddd) ddd-dddd
    FormatPhone {
        /// The number to format
        number: String,
    },

    /// Write a sample contact page fixture
    Sample {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PawfectError> {
    let json_mode = cli.json_mode;
    let config = RuntimeConfig::resolve(cli.config.as_deref())?;
    if cli.verbose {
        tracing::info!(?config, "configuration");
    }

    match cli.command {
        Commands::Check { file } => cmd_check(&file, json_mode),
        Commands::Submit {
            file,
            fail,
            latency_ms,
        } => cmd_submit(&file, &config, fail, latency_ms, json_mode).await,
        Commands::Search { file, query } => cmd_search(&file, &query, json_mode).await,
        Commands::Inspect { file, path, no_map } => {
            cmd_inspect(&file, path.as_deref(), !no_map, &config, json_mode).await
        }
        Commands::FormatPhone { number } => cmd_format_phone(&number, json_mode),
        Commands::Sample { output, force } => cmd_sample(&output, force),
    }
}
