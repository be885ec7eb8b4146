//! p6sync CLI - Main entry point

use clap::Parser;
use p6_cli::{Cli, Commands};
use p6_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Pick up P6_* and LOG_* settings from a local .env
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Handle markdown help generation
    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Ensure a command is provided
    let Some(command) = cli.command else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    // Initialize logging based on verbose flag and environment
    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("p6sync".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // Initialize logging (ignore errors as CLI should work without logging)
    let _ = init_logging(&log_config);

    // Execute command
    let result = match &command {
        Commands::Upload(args) => p6_cli::commands::upload::run(args).await,
        Commands::Inspect(args) => p6_cli::commands::inspect::run(args).await,
    };

    // Handle result
    if let Err(e) = result {
        error!(error = %e, category = %e.category(), "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
