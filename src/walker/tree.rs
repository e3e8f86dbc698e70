//! Recursive directory traversal
//!
//! The walker enumerates the tree on the producer thread, enqueueing one
//! scan job per regular file. Symbolic links are never followed or scanned,
//! so link cycles cannot cause non-termination. Traversal runs concurrently
//! with the worker pool: files discovered early are scanned while later
//! siblings are still being enumerated.
//!
//! The walk's return is the completion barrier: once `walk` comes back,
//! every job has been enqueued and the queue may be shut down.

use crate::error::WorkerError;
use crate::walker::queue::{Enqueue, JobSender, ScanJob};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// How long one enqueue attempt waits before the interrupt flag is
/// re-checked
const ENQUEUE_WAIT: Duration = Duration::from_millis(50);

/// Statistics collected during traversal
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Directories entered
    pub dirs_walked: AtomicU64,

    /// Regular files enqueued for scanning
    pub files_enqueued: AtomicU64,

    /// Symbolic links skipped
    pub symlinks_skipped: AtomicU64,

    /// Directories or entries that could not be read
    pub read_errors: AtomicU64,
}

impl WalkStats {
    fn record_dir(&self) {
        self.dirs_walked.fetch_add(1, Ordering::Relaxed);
    }

    fn record_file(&self) {
        self.files_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    fn record_symlink(&self) {
        self.symlinks_skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn record_read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn files_enqueued(&self) -> u64 {
        self.files_enqueued.load(Ordering::Relaxed)
    }

    pub fn read_errors(&self) -> u64 {
        self.read_errors.load(Ordering::Relaxed)
    }
}

/// Recursively enumerate `dir`, submitting one job per regular file
///
/// Unreadable directories and entries are logged and skipped; they never
/// abort the walk. An `Err` is returned only when the queue itself has
/// closed underneath the walker, which means the pool is gone.
/// The interrupt flag stops discovery early on Ctrl-C.
pub fn walk(
    dir: &Path,
    jobs: &JobSender,
    stats: &WalkStats,
    interrupt: &AtomicBool,
) -> Result<(), WorkerError> {
    if interrupt.load(Ordering::Relaxed) {
        return Ok(());
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(path = %dir.display(), error = %error, "Cannot read directory, skipping");
            stats.record_read_error();
            return Ok(());
        }
    };

    stats.record_dir();

    for entry in entries {
        if interrupt.load(Ordering::Relaxed) {
            return Ok(());
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(path = %dir.display(), error = %error, "Cannot read entry, skipping");
                stats.record_read_error();
                continue;
            }
        };

        // DirEntry::file_type does not follow symlinks, so a link to a
        // directory shows up as a symlink here, not a directory.
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(error) => {
                warn!(path = %entry.path().display(), error = %error, "Cannot stat entry, skipping");
                stats.record_read_error();
                continue;
            }
        };

        if file_type.is_symlink() {
            trace!(path = %entry.path().display(), "Skipping symbolic link");
            stats.record_symlink();
        } else if file_type.is_dir() {
            walk(&entry.path(), jobs, stats, interrupt)?;
        } else if file_type.is_file() {
            if !enqueue_job(ScanJob::new(entry.path()), jobs, interrupt)? {
                return Ok(());
            }
            stats.record_file();
        }
        // Other types (fifos, sockets, devices) are ignored
    }

    Ok(())
}

/// Enqueue one job, waiting in bounded slices while the queue is full
///
/// Interrupted workers stop dequeueing, so a full queue may never drain;
/// an unconditional blocking send here would wedge the walker forever.
/// Returns false when the interrupt arrived before the job fit.
fn enqueue_job(
    mut job: ScanJob,
    jobs: &JobSender,
    interrupt: &AtomicBool,
) -> Result<bool, WorkerError> {
    loop {
        match jobs.send_timeout(job, ENQUEUE_WAIT)? {
            Enqueue::Sent => return Ok(true),
            Enqueue::Full(returned) => {
                if interrupt.load(Ordering::Relaxed) {
                    debug!(path = %returned.path.display(), "Interrupted with queue full, abandoning traversal");
                    return Ok(false);
                }
                job = returned;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::queue::{Dequeue, JobQueue};
    use std::fs;

    fn collect_jobs(queue: &mut JobQueue) -> Vec<std::path::PathBuf> {
        queue.shutdown();
        let receiver = queue.receiver();
        let mut paths = Vec::new();
        loop {
            match receiver.recv() {
                Dequeue::Job(job) => paths.push(job.path),
                _ => break,
            }
        }
        paths.sort();
        paths
    }

    #[test]
    fn test_walk_enqueues_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn main() {}").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.py"), "x = 1").unwrap();

        let mut queue = JobQueue::new(64);
        let sender = queue.sender();
        let stats = WalkStats::default();
        let interrupt = AtomicBool::new(false);

        walk(dir.path(), &sender, &stats, &interrupt).unwrap();
        drop(sender);

        let paths = collect_jobs(&mut queue);
        assert_eq!(paths.len(), 2);
        assert_eq!(stats.files_enqueued(), 2);
        assert_eq!(stats.dirs_walked.load(Ordering::Relaxed), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_symlinks_and_cycles() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("real.c"), "// BUG").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        // Link to a file, and a cycle back to the root
        std::os::unix::fs::symlink(dir.path().join("real.c"), dir.path().join("link.c")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("nested/loop")).unwrap();

        let mut queue = JobQueue::new(64);
        let sender = queue.sender();
        let stats = WalkStats::default();
        let interrupt = AtomicBool::new(false);

        // Must terminate despite the cycle
        walk(dir.path(), &sender, &stats, &interrupt).unwrap();
        drop(sender);

        let paths = collect_jobs(&mut queue);
        assert_eq!(paths, vec![dir.path().join("real.c")]);
        assert_eq!(stats.symlinks_skipped.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_walk_missing_directory_is_not_fatal() {
        let queue = JobQueue::new(8);
        let sender = queue.sender();
        let stats = WalkStats::default();
        let interrupt = AtomicBool::new(false);

        walk(Path::new("/nonexistent/tree"), &sender, &stats, &interrupt).unwrap();
        assert_eq!(stats.read_errors(), 1);
        assert_eq!(stats.files_enqueued(), 0);
    }

    #[test]
    fn test_walk_honors_interrupt() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..10 {
            fs::write(dir.path().join(format!("f{i}.rs")), "").unwrap();
        }

        let queue = JobQueue::new(64);
        let sender = queue.sender();
        let stats = WalkStats::default();
        let interrupt = AtomicBool::new(true);

        walk(dir.path(), &sender, &stats, &interrupt).unwrap();
        assert_eq!(stats.files_enqueued(), 0);
    }

    #[test]
    fn test_walk_returns_when_interrupted_on_full_queue() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..40 {
            fs::write(dir.path().join(format!("f{i}.rs")), "// TODO\n").unwrap();
        }

        // Capacity smaller than the file count, and nothing dequeueing:
        // the walker is guaranteed to hit a queue that never drains.
        let queue = JobQueue::new(8);
        let sender = queue.sender();
        let stats = WalkStats::default();
        let interrupt = AtomicBool::new(false);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                std::thread::sleep(std::time::Duration::from_millis(100));
                interrupt.store(true, Ordering::SeqCst);
            });

            // Must come back once the interrupt lands instead of blocking
            walk(dir.path(), &sender, &stats, &interrupt).unwrap();
        });

        assert!(stats.files_enqueued() <= 8);
    }
}
