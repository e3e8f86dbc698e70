//! Job queue for pending file scans
//!
//! A bounded FIFO of scan jobs connecting the tree walker (producer) to
//! the worker pool (consumers). Shutdown closes the producer side: workers
//! drain every remaining job and then observe `Dequeue::Closed`, so a
//! blocked worker always wakes and no job is lost or processed twice.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::WorkerError;

/// A single file path awaiting scanning
///
/// Created by the tree walker, consumed exactly once by exactly one worker.
#[derive(Debug, Clone)]
pub struct ScanJob {
    /// Full path to the regular file
    pub path: PathBuf,
}

impl ScanJob {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Statistics for the job queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total jobs enqueued
    pub enqueued: AtomicU64,

    /// Total jobs dequeued
    pub dequeued: AtomicU64,
}

impl QueueStats {
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    pub fn dequeued(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }
}

/// Result of a dequeue attempt
#[derive(Debug)]
pub enum Dequeue {
    /// A job was available
    Job(ScanJob),

    /// Nothing available within the timeout; the queue is still open
    Empty,

    /// Shutdown observed: the queue is closed and fully drained
    Closed,
}

/// Result of a bounded enqueue attempt
#[derive(Debug)]
pub enum Enqueue {
    /// The job was accepted
    Sent,

    /// The queue stayed full for the whole timeout; the job is handed
    /// back so the producer can retry after checking its interrupt flag
    Full(ScanJob),
}

/// Bounded job queue with shutdown support
pub struct JobQueue {
    /// Producer side; dropped on shutdown so receivers see disconnect
    sender: Option<Sender<ScanJob>>,

    /// Consumer side
    receiver: Receiver<ScanJob>,

    /// Queue capacity
    capacity: usize,

    /// Queue statistics
    stats: Arc<QueueStats>,
}

impl JobQueue {
    /// Create a new job queue with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);

        Self {
            sender: Some(sender),
            receiver,
            capacity,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Get a sender handle for the producer
    ///
    /// Must not be called after `shutdown`.
    pub fn sender(&self) -> JobSender {
        JobSender {
            sender: self
                .sender
                .as_ref()
                .expect("job queue already shut down")
                .clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get a receiver handle (clone one per worker)
    pub fn receiver(&self) -> JobReceiver {
        JobReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Close the producer side
    ///
    /// Safe to call only once traversal has finished enqueueing (and every
    /// outstanding `JobSender` has been dropped). Buffered jobs are still
    /// delivered; after the last one, every receiver observes `Closed`.
    pub fn shutdown(&mut self) {
        self.sender.take();
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Get queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Handle for enqueueing jobs
#[derive(Clone)]
pub struct JobSender {
    sender: Sender<ScanJob>,
    stats: Arc<QueueStats>,
}

impl JobSender {
    /// Enqueue a job at the tail, blocking while the queue is full
    ///
    /// Blocking here is the backpressure: a full queue slows discovery
    /// down to scanning speed instead of buffering the whole tree.
    pub fn send(&self, job: ScanJob) -> Result<(), WorkerError> {
        self.sender
            .send(job)
            .map_err(|_| WorkerError::QueueSendFailed)?;
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Like `send`, but gives up after `timeout` and hands the job back
    ///
    /// A producer that blocks unconditionally on a full queue can never
    /// observe an interrupt once consumers have stopped dequeueing; this
    /// bounds each wait so the caller gets a chance to bail out.
    pub fn send_timeout(&self, job: ScanJob, timeout: Duration) -> Result<Enqueue, WorkerError> {
        match self.sender.send_timeout(job, timeout) {
            Ok(()) => {
                self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
                Ok(Enqueue::Sent)
            }
            Err(SendTimeoutError::Timeout(job)) => Ok(Enqueue::Full(job)),
            Err(SendTimeoutError::Disconnected(_)) => Err(WorkerError::QueueSendFailed),
        }
    }
}

/// Handle for dequeueing jobs
#[derive(Clone)]
pub struct JobReceiver {
    receiver: Receiver<ScanJob>,
    stats: Arc<QueueStats>,
}

impl JobReceiver {
    /// Block until a job arrives or shutdown is observed with an empty queue
    pub fn recv(&self) -> Dequeue {
        match self.receiver.recv() {
            Ok(job) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Dequeue::Job(job)
            }
            Err(_) => Dequeue::Closed,
        }
    }

    /// Like `recv`, but gives up after `timeout` so callers can poll an
    /// interrupt flag between waits
    pub fn recv_timeout(&self, timeout: Duration) -> Dequeue {
        match self.receiver.recv_timeout(timeout) {
            Ok(job) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Dequeue::Job(job)
            }
            Err(RecvTimeoutError::Timeout) => Dequeue::Empty,
            Err(RecvTimeoutError::Disconnected) => Dequeue::Closed,
        }
    }

    /// Check if the queue is currently empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
