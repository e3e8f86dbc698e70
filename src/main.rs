//! comment-hunter - Concurrent Comment Keyword Scanner
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use comment_hunter::config::{CliArgs, ScanConfig};
use comment_hunter::report::{print_header, print_summary};
use comment_hunter::walker::ScanCoordinator;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = ScanConfig::from_args(args).context("Invalid configuration")?;

    if !config.quiet {
        print_header(&config.root.display().to_string(), config.worker_count);
    }

    // Create coordinator
    let coordinator = ScanCoordinator::new(config).context("Failed to initialize scanner")?;

    // Setup signal handler for graceful shutdown
    let interrupt_flag = coordinator.interrupt_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, shutting down...");
        interrupt_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to set signal handler")?;

    // Run the scan
    let result = coordinator.run().context("Scan failed")?;

    if !result.completed {
        info!("Scan was interrupted before completion");
    }
    if result.errors > 0 {
        info!(errors = result.errors, "Scan completed with errors");
    }

    print_summary(&result);

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("comment_hunter=debug,warn")
    } else {
        EnvFilter::new("comment_hunter=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
