//! Concurrent scanning engine
//!
//! The core of comment-hunter: a fixed-size worker pool consuming a
//! bounded queue of file-scan jobs that grows while the tree walker is
//! still discovering files.
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────────────────────┐
//!                  │      ScanCoordinator     │
//!                  │  - recursive tree walk   │
//!                  │  - queue shutdown        │
//!                  └────────────┬─────────────┘
//!                               │ ScanJob per file
//!                               ▼
//!                  ┌──────────────────────────┐
//!                  │         JobQueue         │
//!                  │   (crossbeam bounded)    │
//!                  └────────────┬─────────────┘
//!                               │
//!         ┌─────────────┬──────┴───────┬─────────────┐
//!         ▼             ▼              ▼             ▼
//!    ┌─────────┐   ┌─────────┐    ┌─────────┐   ┌─────────┐
//!    │Worker 1 │   │Worker 2 │    │Worker 3 │...│Worker N │
//!    │ scanner │   │ scanner │    │ scanner │   │ scanner │
//!    └────┬────┘   └────┬────┘    └────┬────┘   └────┬────┘
//!         │             │              │             │
//!         └─────────────┴──────┬───────┴─────────────┘
//!                              ▼
//!                  ┌──────────────────────────┐
//!                  │    Shared ScanContext    │
//!                  │  atomic keyword counters │
//!                  │  extension tally (mutex) │
//!                  └──────────────────────────┘
//! ```

pub mod coordinator;
pub mod queue;
pub mod tree;
pub mod worker;

pub use coordinator::{ScanCoordinator, ScanResult};
pub use queue::{Dequeue, Enqueue, JobQueue, JobReceiver, JobSender, ScanJob};
pub use tree::WalkStats;
pub use worker::{ScanWorker, WorkerStats};
