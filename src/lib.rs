//! comment-hunter - Concurrent Comment Keyword Scanner
//!
//! Recursively scans a directory tree, classifies each regular file by its
//! comment syntax, and searches comment text for keyword markers (TODO,
//! FIXME, BUG, HACK, plus user-supplied regexes). Produces per-keyword
//! counts and a per-extension file-frequency table.
//!
//! # Features
//!
//! - **Parallel Scanning**: A fixed-size worker pool consumes a bounded
//!   job queue that grows while the tree is still being traversed, so
//!   files discovered early are scanned before later siblings are even
//!   enumerated.
//!
//! - **Safe Aggregation**: Keyword counters are lock-free atomics; the
//!   extension frequency map updates inside a single critical section.
//!   No lost updates, no merge step.
//!
//! - **Symlink Safe**: Symbolic links are never traversed or scanned, so
//!   link cycles cannot cause infinite recursion.
//!
//! - **Degrades Gracefully**: An unreadable file, an unreadable directory,
//!   or even a panic while scanning one file is logged and skipped; the
//!   rest of the run is unaffected.
//!
//! # Example
//!
//! ```bash
//! # Scan the current tree
//! comment-hunter .
//!
//! # Verbose per-match output with extra patterns
//! comment-hunter src/ -v -r 'XXX' -r 'DEPRECATED'
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod pattern;
pub mod report;
pub mod scanner;
pub mod walker;

pub use classify::{CommentSyntax, ExtensionTally};
pub use config::{CliArgs, ScanConfig};
pub use error::{ConfigError, HunterError, Result, ScanOutcome, WorkerError};
pub use pattern::{KeywordMatcher, PatternSet};
pub use report::Report;
pub use scanner::{MatchSink, ScanContext};
pub use walker::{ScanCoordinator, ScanResult};
