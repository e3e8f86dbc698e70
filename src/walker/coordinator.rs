//! Scan coordinator - orchestrates one scan run
//!
//! The coordinator is responsible for:
//! - Building the shared scan context (patterns, tally, sink)
//! - Setting up the job queue and spawning workers
//! - Running the tree walk on its own thread, concurrent with scanning
//! - Shutting the queue down once traversal has provably finished
//! - Joining every worker before the report snapshot is taken

use crate::config::ScanConfig;
use crate::error::Result;
use crate::pattern::PatternSet;
use crate::report::Report;
use crate::scanner::{MatchSink, ScanContext};
use crate::walker::queue::JobQueue;
use crate::walker::tree::{self, WalkStats};
use crate::walker::worker::{aggregate_stats, ScanWorker};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a completed scan run
#[derive(Debug)]
pub struct ScanResult {
    /// Aggregated counts, snapshotted after the pool fully stopped
    pub report: Report,

    /// Files skipped (unsupported extensions)
    pub files_skipped: u64,

    /// Per-file failures plus unreadable directories
    pub errors: u64,

    /// Time taken for the scan
    pub duration: Duration,

    /// Whether the scan ran to completion (vs. was interrupted)
    pub completed: bool,
}

/// Coordinates the concurrent scan of one directory tree
pub struct ScanCoordinator {
    /// Configuration
    config: Arc<ScanConfig>,

    /// Shared scan state handed to every worker
    context: Arc<ScanContext>,

    /// Job queue between the walker and the pool
    queue: JobQueue,

    /// Worker threads
    workers: Vec<ScanWorker>,

    /// Interrupt signal (Ctrl-C)
    interrupt: Arc<AtomicBool>,
}

impl ScanCoordinator {
    /// Create a new coordinator
    ///
    /// Pattern compilation happens here, so an invalid or empty custom
    /// pattern aborts before any traversal with zero files scanned.
    pub fn new(config: ScanConfig) -> Result<Self> {
        let sink = if config.verbose {
            MatchSink::stdout()
        } else {
            MatchSink::disabled()
        };
        Self::with_sink(config, sink)
    }

    /// Create a coordinator with an explicit match sink
    ///
    /// Used by tests to capture verbose output in a buffer.
    pub fn with_sink(config: ScanConfig, sink: MatchSink) -> Result<Self> {
        let patterns = PatternSet::with_custom(&config.custom_patterns)?;
        let context = Arc::new(ScanContext::new(patterns, sink));
        let queue = JobQueue::new(config.queue_capacity);

        Ok(Self {
            config: Arc::new(config),
            context,
            queue,
            workers: Vec::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get a clone of the interrupt flag (for signal handlers)
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Run the scan
    pub fn run(mut self) -> Result<ScanResult> {
        let start_time = Instant::now();

        info!(
            root = %self.config.root.display(),
            workers = self.config.worker_count,
            "Starting scan"
        );

        self.spawn_workers()?;

        // Traverse on this thread while the pool consumes. The walk
        // returning is the completion barrier: every recursive call has
        // finished, so no further jobs can arrive.
        let walk_stats = WalkStats::default();
        let jobs = self.queue.sender();
        tree::walk(&self.config.root, &jobs, &walk_stats, &self.interrupt)?;
        drop(jobs);

        debug!(
            files = walk_stats.files_enqueued(),
            "Traversal complete, shutting down queue"
        );
        self.queue.shutdown();

        let (files, lines, matches, skipped, scan_errors) = self.join_workers()?;
        let completed = !self.interrupt.load(Ordering::Relaxed);

        // Every worker has stopped; the snapshot cannot race an update.
        let report = Report::collect(&self.context);
        let errors = scan_errors + walk_stats.read_errors();
        let duration = start_time.elapsed();

        info!(
            files,
            lines,
            matches,
            errors,
            duration_ms = duration.as_millis() as u64,
            "Scan finished"
        );

        Ok(ScanResult {
            report,
            files_skipped: skipped,
            errors,
            duration,
            completed,
        })
    }

    /// Spawn worker threads
    fn spawn_workers(&mut self) -> Result<()> {
        for id in 0..self.config.worker_count {
            let worker = ScanWorker::spawn(
                id,
                Arc::clone(&self.context),
                self.queue.receiver(),
                Arc::clone(&self.interrupt),
            )?;
            self.workers.push(worker);
        }

        debug!(count = self.workers.len(), "Workers spawned");
        Ok(())
    }

    /// Join all worker threads, then collect final stats
    ///
    /// The stats handles outlive the joins, and summing happens strictly
    /// after every thread has stopped. Aggregating any earlier would
    /// snapshot counters that workers are still incrementing.
    fn join_workers(&mut self) -> Result<(u64, u64, u64, u64, u64)> {
        let workers = std::mem::take(&mut self.workers);
        let stats: Vec<_> = workers.iter().map(ScanWorker::stats_handle).collect();

        for worker in workers {
            if let Err(e) = worker.join() {
                warn!(error = %e, "Worker failed to join cleanly");
            }
        }

        Ok(aggregate_stats(&stats))
    }
}
