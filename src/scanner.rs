//! Line-oriented comment scanning
//!
//! `ScanContext` is the shared, read-mostly state handed to every worker:
//! the compiled pattern set, the extension tally, and the verbose match
//! sink. `scan_file` reads one file top to bottom; `scan_line` bounds the
//! search to the comment region (from the first marker occurrence to end
//! of line) and tests it against every matcher.

use crate::classify::{CommentSyntax, ExtensionTally};
use crate::error::ScanOutcome;
use crate::pattern::PatternSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;

/// Destination for verbose per-match records
///
/// Emissions take a dedicated lock so that records from concurrent workers
/// never interleave mid-line. A disabled sink costs one branch per match.
pub struct MatchSink {
    writer: Option<Mutex<Box<dyn Write + Send>>>,
}

impl MatchSink {
    /// Sink that drops all records (verbose mode off)
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    /// Sink that writes records to stdout
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Sink that writes records to an arbitrary writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Some(Mutex::new(writer)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Emit one match record: file path, 1-based line number, matcher
    /// label, and the full line text.
    pub fn emit(&self, path: &Path, line_number: u64, label: &str, line: &str) {
        if let Some(writer) = &self.writer {
            let mut out = writer.lock().expect("match sink lock poisoned");
            let _ = writeln!(
                out,
                "{}:{}: {}: {}",
                path.display(),
                line_number,
                label,
                line.trim_end()
            );
        }
    }
}

/// Shared scan state: patterns, tally, and verbose sink
///
/// Constructed once per run and shared by `Arc` across the worker pool.
/// The matcher counters and tally are the only mutable parts, both under
/// atomic or mutex-guarded update.
pub struct ScanContext {
    patterns: PatternSet,
    tally: ExtensionTally,
    sink: MatchSink,
}

impl ScanContext {
    pub fn new(patterns: PatternSet, sink: MatchSink) -> Self {
        Self {
            patterns,
            tally: ExtensionTally::new(),
            sink,
        }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn tally(&self) -> &ExtensionTally {
        &self.tally
    }

    /// Scan one file, top to bottom
    ///
    /// Unsupported extensions are skipped. A file that cannot be opened is
    /// skipped and not counted toward any tally; the tally is recorded only
    /// after a successful open so the "counted at most once, and only if
    /// scanned" invariant holds. Lines are read as raw bytes and converted
    /// lossily, since source trees routinely contain non-UTF-8 bytes.
    pub fn scan_file(&self, path: &Path) -> ScanOutcome {
        let Some((syntax, ext)) = CommentSyntax::for_path(path) else {
            return ScanOutcome::Skipped {
                path: path.to_path_buf(),
                reason: "unsupported file type".into(),
            };
        };

        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) => {
                return ScanOutcome::Failed {
                    path: path.to_path_buf(),
                    error,
                }
            }
        };

        self.tally.record(ext);

        let mut reader = BufReader::new(file);
        let mut buffer = Vec::with_capacity(8 * 1024);
        let mut lines = 0u64;
        let mut matches = 0u64;

        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {
                    lines += 1;
                    let line = String::from_utf8_lossy(&buffer);
                    matches += self.scan_line(&line, syntax, path, lines);
                }
                Err(error) => {
                    // Mid-file read error: keep what was already scanned
                    warn!(path = %path.display(), error = %error, "Read error, stopping file early");
                    break;
                }
            }
        }

        ScanOutcome::Scanned {
            path: path.to_path_buf(),
            lines,
            matches,
        }
    }

    /// Scan one line; returns the number of matchers that fired
    ///
    /// Text before the first marker occurrence is never searched. Each
    /// matcher counts at most once per line regardless of how many times
    /// its keyword occurs in the region.
    pub fn scan_line(&self, line: &str, syntax: CommentSyntax, path: &Path, line_number: u64) -> u64 {
        let Some(index) = line.find(syntax.marker()) else {
            return 0;
        };
        let region = &line[index..];

        let mut hits = 0u64;
        for matcher in self.patterns.matchers() {
            if matcher.is_match(region) {
                matcher.record();
                hits += 1;

                if self.sink.is_enabled() {
                    self.sink.emit(path, line_number, matcher.label(), line);
                }
            }
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as IoWrite;
    use std::sync::Arc;

    fn context() -> ScanContext {
        ScanContext::new(PatternSet::builtin(), MatchSink::disabled())
    }

    /// Writer that appends into a shared buffer, for asserting sink output
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl IoWrite for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_without_marker_matches_nothing() {
        let ctx = context();
        let hits = ctx.scan_line(
            "let todo = TODO_SENTINEL;",
            CommentSyntax::DoubleSlash,
            Path::new("a.rs"),
            1,
        );
        assert_eq!(hits, 0);
        assert_eq!(ctx.patterns().counts()[0].1, 0);
    }

    #[test]
    fn test_match_only_after_marker() {
        let ctx = context();

        // TODO before the marker is outside the comment region
        let hits = ctx.scan_line(
            "call(TODO_FLAG); // nothing to see",
            CommentSyntax::DoubleSlash,
            Path::new("a.cpp"),
            1,
        );
        assert_eq!(hits, 0);

        let hits = ctx.scan_line(
            "call(); // TODO tidy up",
            CommentSyntax::DoubleSlash,
            Path::new("a.cpp"),
            2,
        );
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_first_marker_bounds_region() {
        // The // inside the string literal is the first marker; the real
        // comment follows later on the same line, so TODO is still inside
        // the searched region.
        let ctx = context();
        let hits = ctx.scan_line(
            r#"std::string url = "//example.com"; // TODO use https"#,
            CommentSyntax::DoubleSlash,
            Path::new("url.cpp"),
            1,
        );
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_once_per_line_per_matcher() {
        let ctx = context();
        let hits = ctx.scan_line(
            "# TODO this and TODO that",
            CommentSyntax::PoundSign,
            Path::new("a.py"),
            1,
        );
        assert_eq!(hits, 1);
        assert_eq!(ctx.patterns().counts()[0].1, 1);
    }

    #[test]
    fn test_multiple_matchers_on_one_line() {
        let ctx = context();
        let hits = ctx.scan_line(
            "// TODO and also FIXME(bob)",
            CommentSyntax::DoubleSlash,
            Path::new("a.rs"),
            1,
        );
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_scan_file_counts_and_tally() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.py");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "x = 1").unwrap();
        writeln!(file, "y = 2  # setup").unwrap();
        writeln!(file, "# TODO fix this").unwrap();
        drop(file);

        let ctx = context();
        let outcome = ctx.scan_file(&path);

        match outcome {
            ScanOutcome::Scanned { lines, matches, .. } => {
                assert_eq!(lines, 3);
                assert_eq!(matches, 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert_eq!(ctx.tally().files_scanned(), 1);
        assert_eq!(ctx.tally().snapshot(), vec![(".py".to_string(), 1)]);
        assert_eq!(ctx.patterns().counts()[0], ("TODO".to_string(), 1));
    }

    #[test]
    fn test_scan_file_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "// TODO not a source file").unwrap();

        let ctx = context();
        let outcome = ctx.scan_file(&path);

        assert!(matches!(outcome, ScanOutcome::Skipped { .. }));
        assert_eq!(ctx.tally().files_scanned(), 0);
        assert_eq!(ctx.patterns().counts()[0].1, 0);
    }

    #[test]
    fn test_scan_file_missing_is_failed_and_uncounted() {
        let ctx = context();
        let outcome = ctx.scan_file(Path::new("/nonexistent/ghost.rs"));

        assert!(matches!(outcome, ScanOutcome::Failed { .. }));
        assert_eq!(ctx.tally().files_scanned(), 0);
    }

    #[test]
    fn test_scan_file_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.rs");
        std::fs::write(&path, b"let a = 1;\n// FIXME \xff\xfe broken bytes\n").unwrap();

        let ctx = context();
        let outcome = ctx.scan_file(&path);

        match outcome {
            ScanOutcome::Scanned { lines, matches, .. } => {
                assert_eq!(lines, 2);
                assert_eq!(matches, 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_sink_emits_full_record() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = MatchSink::with_writer(Box::new(SharedBuffer(Arc::clone(&buffer))));
        let ctx = ScanContext::new(PatternSet::builtin(), sink);

        ctx.scan_line(
            "// HACK temporary workaround",
            CommentSyntax::DoubleSlash,
            Path::new("src/lib.rs"),
            42,
        );

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(output, "src/lib.rs:42: HACK: // HACK temporary workaround\n");
    }

    #[test]
    fn test_disabled_sink_emits_nothing() {
        let sink = MatchSink::disabled();
        assert!(!sink.is_enabled());
        // Emit on a disabled sink is a no-op
        sink.emit(Path::new("a.rs"), 1, "TODO", "// TODO");
    }
}
