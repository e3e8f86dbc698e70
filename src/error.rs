//! Error types for comment-hunter
//!
//! This module defines the error hierarchy covering:
//! - Configuration and CLI errors
//! - Worker thread errors
//! - Per-file scan outcomes
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Per-file failures are outcomes, not errors - one unreadable file
//!   must never abort the run

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the comment-hunter application
#[derive(Error, Debug)]
pub enum HunterError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and CLI errors
///
/// All of these are fatal at startup, before any traversal begins.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Root path does not exist
    #[error("Root path '{path}' does not exist")]
    RootNotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("Root path '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid queue capacity
    #[error("Invalid queue capacity {capacity}: must be at least {min}")]
    InvalidQueueCapacity { capacity: usize, min: usize },

    /// Custom pattern was empty
    #[error("Custom pattern must not be empty")]
    EmptyPattern,

    /// Custom pattern failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker initialization failed
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Job queue send failed
    #[error("Failed to enqueue scan job: queue closed")]
    QueueSendFailed,
}

/// Result type alias for HunterError
pub type Result<T> = std::result::Result<T, HunterError>;

/// Represents the outcome of scanning a single file
///
/// Skips and per-file failures are expected outcomes, recorded in worker
/// stats and logged; only run-level plumbing produces real errors.
#[derive(Debug)]
pub enum ScanOutcome {
    /// File was classified, opened, and scanned to the end
    Scanned {
        path: PathBuf,
        lines: u64,
        matches: u64,
    },

    /// File skipped (unsupported extension)
    Skipped { path: PathBuf, reason: String },

    /// File could not be read; it is not counted toward any tally
    Failed {
        path: PathBuf,
        error: std::io::Error,
    },
}

impl ScanOutcome {
    /// Returns true if this outcome represents a completed scan
    pub fn is_scanned(&self) -> bool {
        matches!(self, ScanOutcome::Scanned { .. })
    }

    /// Returns the path associated with this outcome
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanOutcome::Scanned { path, .. } => path,
            ScanOutcome::Skipped { path, .. } => path,
            ScanOutcome::Failed { path, .. } => path,
        }
    }
}
