//! LightConvert - Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use lightconvert::registry::dataset_names;
use lightconvert::{run, Cli};
use lightconvert_common::logging::{init_logging, LogConfig, LogLevel, WorkerGuard};
use std::process;
use tracing::{error, info};

fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.list_datasets {
        for name in dataset_names() {
            println!("{}", name);
        }
        return;
    }

    // Conversion works without logging
    let guard = setup_logging(cli.verbose).unwrap_or_else(|e| {
        eprintln!("Warning: {:#}", e);
        None
    });

    let code = match execute(&cli) {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Conversion failed");
            eprintln!("Error: {:#}", e);
            1
        },
    };

    // process::exit skips destructors; flush the log file first
    drop(guard);
    process::exit(code);
}

fn setup_logging(verbose: bool) -> Result<Option<WorkerGuard>> {
    let log_level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("lightconvert")
        .build()
        .merge_env()
        .context("invalid logging environment")?;

    init_logging(&log_config).context("failed to initialize logging")
}

fn execute(cli: &Cli) -> Result<()> {
    let summary = run(cli).with_context(|| format!("dataset '{}'", cli.dataset))?;

    for (relation, rows) in &summary.converted {
        info!(relation = %relation, rows, "Converted");
    }
    Ok(())
}
