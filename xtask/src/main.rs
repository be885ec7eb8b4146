//! Build automation tasks for p6sync
//!
//! This tool provides automation tasks for the workspace:
//! - Generating the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for p6sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn render(markdown: &str, generated_on: &str) -> String {
    format!(
        r#"# p6sync CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {generated_on}.

## Overview

p6sync reads a Primavera P6 XML export (plain or gzip-compressed), normalizes its
calendars, resources, projects, WBS nodes, activities (current and baseline) and
resource assignments, and uploads them to a tabular sink in dependency order.

## Quick Start

```bash
# See what an export contains without sending anything
p6sync inspect export.xml --output reports/

# Upload to a Business Central tenant
export P6_BC_ENVIRONMENT=<tenant environment id>
export P6_BC_COMPANY=<company id>
p6sync upload export.xml --upload-date 2024-06-01
```

## Commands

{markdown}

## Environment Variables

- `P6_SINK_URL` - Sink base URL; overrides the Business Central composition
- `P6_BC_ENVIRONMENT`, `P6_BC_ENVIRONMENT_NAME` (default `UAT`), `P6_BC_COMPANY` - Business Central target
- `P6_TOKEN_URL` - Token service endpoint (default: `http://localhost:3001/token`)
- `P6_CHUNK_SIZE` - Records per request (default: `500`)
- `P6_HTTP_TIMEOUT_SECS` - Per-request timeout (default: none)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR` - Logging

A `.env` file in the working directory is loaded at startup.

---

*This documentation is automatically generated from the CLI source code. To update, run `cargo xtask generate-cli-docs`.*
"#
    )
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    // Generate markdown from clap definitions
    let markdown = clap_markdown::help_markdown::<p6_cli::Cli>();
    let content = render(&markdown, &chrono::Utc::now().format("%Y-%m-%d").to_string());

    // Create output directory if it doesn't exist
    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
