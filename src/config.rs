//! Configuration types for comment-hunter
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Minimum queue capacity
const MIN_QUEUE_CAPACITY: usize = 16;

/// Concurrent scanner that hunts keyword markers in source comments
#[derive(Parser, Debug, Clone)]
#[command(
    name = "comment-hunter",
    version,
    about = "Hunt TODO/FIXME/BUG/HACK markers in source comments",
    long_about = "Recursively scans a directory tree, classifies each file by its comment \
                  syntax, and counts keyword markers (TODO, FIXME, BUG, HACK, plus custom \
                  regexes) found inside comment text. Scanning runs on a fixed worker pool \
                  fed by the directory traversal.",
    after_help = "EXAMPLES:\n    \
        comment-hunter src/\n    \
        comment-hunter . -v\n    \
        comment-hunter ~/project -w 8 -r 'XXX' -r 'DEPRECATED'"
)]
pub struct CliArgs {
    /// Directory tree to scan
    #[arg(value_name = "DIRECTORY")]
    pub root: PathBuf,

    /// Print every match (file, line number, keyword, line text)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Number of worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Job queue capacity (bounds memory on huge trees)
    #[arg(long, default_value = "1024", value_name = "NUM")]
    pub queue_size: usize,

    /// Additional regex pattern to hunt for (can be repeated)
    #[arg(short = 'r', long = "regex", value_name = "PATTERN", action = clap::ArgAction::Append)]
    pub custom_patterns: Vec<String>,

    /// Quiet mode - suppress the header banner
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the tree to scan (validated to be a directory)
    pub root: PathBuf,

    /// Number of worker threads
    pub worker_count: usize,

    /// Job queue capacity
    pub queue_capacity: usize,

    /// Print per-match records during the scan
    pub verbose: bool,

    /// Suppress the header banner
    pub quiet: bool,

    /// Raw custom pattern strings, in supplied order
    pub custom_patterns: Vec<String>,
}

impl ScanConfig {
    /// Create and validate configuration from CLI arguments
    ///
    /// Every problem caught here is fatal before any traversal starts:
    /// a missing or non-directory root, out-of-range worker or queue
    /// settings, and empty or non-compiling custom patterns.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let metadata = std::fs::metadata(&args.root).map_err(|_| ConfigError::RootNotFound {
            path: args.root.clone(),
        })?;
        if !metadata.is_dir() {
            return Err(ConfigError::NotADirectory { path: args.root });
        }

        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        if args.queue_size < MIN_QUEUE_CAPACITY {
            return Err(ConfigError::InvalidQueueCapacity {
                capacity: args.queue_size,
                min: MIN_QUEUE_CAPACITY,
            });
        }

        // Patterns compile again into the live PatternSet; this pass just
        // rejects bad input before anything else happens.
        for pattern in &args.custom_patterns {
            if pattern.is_empty() {
                return Err(ConfigError::EmptyPattern);
            }
            Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(Self {
            root: args.root,
            worker_count: args.workers,
            queue_capacity: args.queue_size,
            verbose: args.verbose,
            quiet: args.quiet,
            custom_patterns: args.custom_patterns,
        })
    }
}
