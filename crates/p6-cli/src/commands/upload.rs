//! `p6sync upload` command implementation
//!
//! Parses an export and pushes it to the sink in dependency order.

use colored::Colorize;
use p6_common::UploadDate;

use crate::config::{Config, ConfigOverrides};
use crate::dispatch::DISPATCH_PLAN;
use crate::error::Result;
use crate::progress;
use crate::session::Session;
use crate::UploadArgs;

fn overrides(args: &UploadArgs) -> ConfigOverrides {
    ConfigOverrides {
        sink_url: args.sink_url.clone(),
        bc_environment: args.bc_environment.clone(),
        bc_environment_name: args.bc_environment_name.clone(),
        bc_company: args.bc_company.clone(),
        token_url: args.token_url.clone(),
        chunk_size: args.chunk_size,
    }
}

/// Upload one export file
pub async fn run(args: &UploadArgs) -> Result<()> {
    let config = Config::from_env()?.apply(overrides(args));
    let upload_date = UploadDate::resolve(args.upload_date, UploadDate::today().date());

    let size = std::fs::metadata(&args.file)
        .map(|m| progress::format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown size".to_string());
    println!(
        "{} Uploading {} ({}) with upload date {}",
        "→".cyan(),
        args.file.display(),
        size,
        upload_date
    );

    let mut reporter = super::reporter(DISPATCH_PLAN.len(), !args.no_progress);
    let summary = Session::new()
        .upload(&args.file, upload_date, &config, &mut reporter)
        .await?;

    println!("{}", summary.to_table());
    if summary.total_dropped() > 0 {
        println!(
            "{} {} record(s) dropped by validation",
            "!".yellow(),
            summary.total_dropped()
        );
    }
    println!(
        "{} Upload complete: {} request(s) sent",
        "✓".green(),
        summary.total_requests()
    );
    Ok(())
}
