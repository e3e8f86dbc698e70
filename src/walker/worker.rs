//! Worker thread logic for the scanning pool
//!
//! Each worker:
//! - Pulls file-scan jobs from the shared job queue
//! - Runs the line scanner over each file
//! - Records results into the shared context (atomic counters)
//! - Exits when shutdown is observed with an empty queue
//!
//! A failure while scanning one file - including a panic - is recovered at
//! the loop boundary; the worker logs it and moves to its next job.

use crate::error::{ScanOutcome, WorkerError};
use crate::scanner::ScanContext;
use crate::walker::queue::{Dequeue, JobReceiver};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, trace, warn};

/// How long a worker waits for a job before re-checking the interrupt flag
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Statistics collected by a worker
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Files fully scanned
    pub files_scanned: AtomicU64,

    /// Lines read across all scanned files
    pub lines_scanned: AtomicU64,

    /// Keyword matches recorded
    pub matches_found: AtomicU64,

    /// Files skipped (unsupported type)
    pub skipped: AtomicU64,

    /// Per-file failures (unreadable, panicked)
    pub errors: AtomicU64,
}

impl WorkerStats {
    fn record_scan(&self, lines: u64, matches: u64) {
        self.files_scanned.fetch_add(1, Ordering::Relaxed);
        self.lines_scanned.fetch_add(lines, Ordering::Relaxed);
        self.matches_found.fetch_add(matches, Ordering::Relaxed);
    }

    fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// A worker thread that processes scan jobs
pub struct ScanWorker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl ScanWorker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        context: Arc<ScanContext>,
        queue_rx: JobReceiver,
        interrupt: Arc<AtomicBool>,
    ) -> Result<Self, WorkerError> {
        let stats = Arc::new(WorkerStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("scan-{}", id))
            .spawn(move || worker_loop(id, context, queue_rx, interrupt, stats_clone))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get a shared handle to this worker's statistics
    ///
    /// The handle stays valid across `join`, so totals can be read after
    /// the thread has stopped.
    pub fn stats_handle(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked {
                id: self.id,
                message: "Worker thread panicked".into(),
            })?;
        }
        Ok(())
    }
}

/// Main worker loop: dequeue, scan, repeat until shutdown
fn worker_loop(
    id: usize,
    context: Arc<ScanContext>,
    queue_rx: JobReceiver,
    interrupt: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
) {
    debug!(worker = id, "Worker starting");

    loop {
        if interrupt.load(Ordering::Relaxed) {
            debug!(worker = id, "Interrupt observed, stopping");
            break;
        }

        let job = match queue_rx.recv_timeout(POLL_INTERVAL) {
            Dequeue::Job(job) => job,
            Dequeue::Empty => continue,
            Dequeue::Closed => break,
        };

        // A panic inside one file's scan must not take the worker down;
        // the remaining jobs still need a consumer.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| context.scan_file(&job.path)));

        match outcome {
            Ok(ScanOutcome::Scanned {
                path,
                lines,
                matches,
            }) => {
                stats.record_scan(lines, matches);
                trace!(worker = id, path = %path.display(), lines, matches, "File scanned");
            }
            Ok(ScanOutcome::Skipped { path, reason }) => {
                stats.record_skip();
                trace!(worker = id, path = %path.display(), reason = %reason, "File skipped");
            }
            Ok(ScanOutcome::Failed { path, error }) => {
                stats.record_error();
                warn!(worker = id, path = %path.display(), error = %error, "File unreadable, skipping");
            }
            Err(_) => {
                stats.record_error();
                error!(worker = id, path = %job.path.display(), "Scan panicked, continuing with next job");
            }
        }
    }

    debug!(
        worker = id,
        files = stats.files_scanned.load(Ordering::Relaxed),
        matches = stats.matches_found.load(Ordering::Relaxed),
        "Worker shutting down"
    );
}

/// Aggregate statistics from a set of worker stats handles
///
/// Takes the handles rather than the workers themselves so totals are
/// summed only after every thread has been joined; a still-running
/// worker would make the sums a moving target.
///
/// Returns (files_scanned, lines_scanned, matches_found, skipped, errors).
pub fn aggregate_stats(stats: &[Arc<WorkerStats>]) -> (u64, u64, u64, u64, u64) {
    let mut files = 0u64;
    let mut lines = 0u64;
    let mut matches = 0u64;
    let mut skipped = 0u64;
    let mut errors = 0u64;

    for s in stats {
        files += s.files_scanned.load(Ordering::Relaxed);
        lines += s.lines_scanned.load(Ordering::Relaxed);
        matches += s.matches_found.load(Ordering::Relaxed);
        skipped += s.skipped.load(Ordering::Relaxed);
        errors += s.errors.load(Ordering::Relaxed);
    }

    (files, lines, matches, skipped, errors)
}
