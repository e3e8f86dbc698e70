//! Comment syntax classification and extension frequencies
//!
//! Maps file extensions to the line-comment marker used by that language,
//! and tallies how many files of each extension were scanned. Unknown
//! extensions classify as `None` and are skipped without error.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// The lexical marker that begins a line comment for a file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `//`-style comments (C, C++, Rust, ...)
    DoubleSlash,

    /// `#`-style comments (Python, shell, ...)
    PoundSign,
}

impl CommentSyntax {
    /// The marker string to search for in a line
    pub fn marker(&self) -> &'static str {
        match self {
            CommentSyntax::DoubleSlash => "//",
            CommentSyntax::PoundSign => "#",
        }
    }

    /// Look up the syntax for a file path's extension
    ///
    /// Pure lookup with no side effects: the extension frequency tally is
    /// recorded separately, only once the file is confirmed readable. The
    /// bare extension is returned alongside the syntax so the caller can
    /// record that tally without a second lookup. Returns `None` for
    /// unknown extensions and extensionless paths, which callers treat as
    /// "skip, not an error".
    pub fn for_path(path: &Path) -> Option<(Self, &str)> {
        let ext = path.extension()?.to_str()?;
        Self::for_extension(ext).map(|syntax| (syntax, ext))
    }

    /// Look up the syntax for a bare extension (no leading dot)
    ///
    /// Case-sensitive, like the rest of the filesystem handling.
    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext {
            "c" | "cc" | "cpp" | "h" | "hpp" | "cs" | "go" | "java" | "js" | "rs" | "ts"
            | "zig" => Some(CommentSyntax::DoubleSlash),
            "py" | "rb" | "sh" => Some(CommentSyntax::PoundSign),
            _ => None,
        }
    }
}

/// Shared tally of scanned files and their extensions
///
/// The frequency map performs its contains-or-insert plus increment as one
/// critical section, so concurrent first-inserts of the same extension
/// cannot lose updates.
#[derive(Debug, Default)]
pub struct ExtensionTally {
    files: AtomicU64,
    by_extension: Mutex<HashMap<String, u64>>,
}

impl ExtensionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scanned file with the given bare extension
    pub fn record(&self, ext: &str) {
        self.files.fetch_add(1, Ordering::Relaxed);

        let mut map = self.by_extension.lock().expect("extension tally lock poisoned");
        *map.entry(format!(".{ext}")).or_insert(0) += 1;
    }

    /// Total files scanned so far
    pub fn files_scanned(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }

    /// Snapshot of (extension, count) rows, most frequent first
    ///
    /// Ties break on extension name so output is deterministic.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let map = self.by_extension.lock().expect("extension tally lock poisoned");
        let mut rows: Vec<_> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }
}
