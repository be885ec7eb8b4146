//! p6sync CLI Library
//!
//! Pushes project-schedule XML exports to a tabular upload sink.
//!
//! # Overview
//!
//! - **Upload**: parse, normalize and send an export in dependency order (`p6sync upload`)
//! - **Inspect**: dry run that reports counts and can dump every bucket as JSON Lines (`p6sync inspect`)
//!
//! Runs are serialized through a [`session::Session`]; any parse, auth or
//! dispatch failure ends the run with a single error.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod progress;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use session::Session;
pub use summary::RunSummary;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// p6sync - Primavera P6 export uploader
#[derive(Parser, Debug)]
#[command(name = "p6sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the command reference as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an export and upload it to the sink
    Upload(UploadArgs),

    /// Parse an export and report what would be uploaded
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// Export file (.xml or .xml.gz)
    pub file: PathBuf,

    /// Date stamped on every record, YYYY-MM-DD (defaults to today, capped at today)
    #[arg(long)]
    pub upload_date: Option<NaiveDate>,

    /// Sink base URL, overrides the Business Central composition
    #[arg(long, env = "P6_SINK_URL")]
    pub sink_url: Option<String>,

    /// Business Central tenant environment id
    #[arg(long, env = "P6_BC_ENVIRONMENT")]
    pub bc_environment: Option<String>,

    /// Business Central environment name
    #[arg(long, env = "P6_BC_ENVIRONMENT_NAME")]
    pub bc_environment_name: Option<String>,

    /// Business Central company id
    #[arg(long, env = "P6_BC_COMPANY")]
    pub bc_company: Option<String>,

    /// Token service endpoint
    #[arg(long, env = "P6_TOKEN_URL")]
    pub token_url: Option<String>,

    /// Records per request
    #[arg(long, env = "P6_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Export file (.xml or .xml.gz)
    pub file: PathBuf,

    /// Date stamped on every record, YYYY-MM-DD (defaults to today, capped at today)
    #[arg(long)]
    pub upload_date: Option<NaiveDate>,

    /// Directory to write one JSON Lines file per bucket
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
