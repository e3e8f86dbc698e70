//! Final report snapshot and console rendering

use crate::scanner::ScanContext;
use crate::walker::ScanResult;
use console::style;

/// Read-only snapshot of one scan run's aggregate counters
///
/// Taken only after the worker pool has fully stopped, so the counts are
/// final, never partial.
#[derive(Debug)]
pub struct Report {
    /// Total files scanned
    pub files_scanned: u64,

    /// One (label, count) row per keyword matcher, in configured order
    pub keyword_counts: Vec<(String, u64)>,

    /// One (extension, count) row per extension, most frequent first
    pub extension_counts: Vec<(String, u64)>,
}

impl Report {
    /// Snapshot the shared context
    pub fn collect(context: &ScanContext) -> Self {
        Self {
            files_scanned: context.tally().files_scanned(),
            keyword_counts: context.patterns().counts(),
            extension_counts: context.tally().snapshot(),
        }
    }

    /// Look up the final count for a matcher label
    pub fn keyword_count(&self, label: &str) -> Option<u64> {
        self.keyword_counts
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| *n)
    }

    /// Sum of all keyword counts
    pub fn total_matches(&self) -> u64 {
        self.keyword_counts.iter().map(|(_, n)| n).sum()
    }
}

/// Print a header at the start of the scan
pub fn print_header(root: &str, workers: usize) {
    println!();
    println!(
        "{} {}",
        style("comment-hunter").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Root:").bold(), root);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!();
}

/// Print a summary of the scan results
pub fn print_summary(result: &ScanResult) {
    let report = &result.report;

    println!();
    if result.completed {
        println!("{}", style("Scan Complete").green().bold());
    } else {
        println!("{}", style("Scan Interrupted").yellow().bold());
    }
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Files scanned:").bold(),
        format_number(report.files_scanned)
    );
    println!(
        "  {} {:.2}s",
        style("Duration:").bold(),
        result.duration.as_secs_f64()
    );
    if result.files_skipped > 0 {
        println!(
            "  {} {}",
            style("Skipped:").bold(),
            format_number(result.files_skipped)
        );
    }
    if result.errors > 0 {
        println!(
            "  {} {}",
            style("Errors:").yellow().bold(),
            format_number(result.errors)
        );
    }

    println!();
    println!("{}", style("Keyword matches").bold());
    for (label, count) in &report.keyword_counts {
        println!("  {:<16} {}", label, format_number(*count));
    }

    if !report.extension_counts.is_empty() {
        println!();
        println!("{}", style("Files by extension").bold());
        for (ext, count) in &report.extension_counts {
            println!("  {:<16} {}", ext, format_number(*count));
        }
    }
    println!();
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternSet;
    use crate::scanner::MatchSink;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_collect_snapshot() {
        let context = ScanContext::new(PatternSet::builtin(), MatchSink::disabled());
        context.patterns().matchers()[0].record();
        context.tally().record("rs");

        let report = Report::collect(&context);
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.keyword_count("TODO"), Some(1));
        assert_eq!(report.keyword_count("FIXME"), Some(0));
        assert_eq!(report.keyword_count("NOPE"), None);
        assert_eq!(report.total_matches(), 1);
        assert_eq!(report.extension_counts, vec![(".rs".to_string(), 1)]);
    }
}
