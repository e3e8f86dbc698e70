//! Keyword matchers and their match counters
//!
//! A `PatternSet` holds the built-in markers (TODO, FIXME, BUG, HACK)
//! followed by any user-supplied regexes, in configured order. Every
//! matcher compiles its regex exactly once at startup and carries an
//! atomic counter, so workers record matches without any lock.

use crate::error::ConfigError;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Built-in keywords, matched at a word boundary with an optional
/// parenthesized tag, e.g. `TODO` or `TODO(alice)`.
const BUILTIN_KEYWORDS: [&str; 4] = ["TODO", "FIXME", "BUG", "HACK"];

/// A compiled pattern with a label and a running match count
#[derive(Debug)]
pub struct KeywordMatcher {
    regex: Regex,
    label: String,
    count: AtomicU64,
}

impl KeywordMatcher {
    fn new(label: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            regex,
            label: label.into(),
            count: AtomicU64::new(0),
        })
    }

    /// Human-readable label (the keyword, or the raw custom pattern)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current match count
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Test a comment region against this matcher
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Record one match
    ///
    /// Called at most once per line per matcher: N occurrences of a
    /// keyword on the same line still count as one.
    pub fn record(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Ordered collection of keyword matchers
#[derive(Debug)]
pub struct PatternSet {
    matchers: Vec<KeywordMatcher>,
}

impl PatternSet {
    /// Build the built-in matcher set
    pub fn builtin() -> Self {
        let matchers = BUILTIN_KEYWORDS
            .iter()
            .map(|keyword| {
                KeywordMatcher::new(*keyword, &builtin_pattern(keyword))
                    .expect("Invalid built-in keyword pattern")
            })
            .collect();

        Self { matchers }
    }

    /// Build the built-in set followed by custom patterns, in order
    ///
    /// An empty pattern string is rejected: `Regex::new("")` would compile
    /// and match every line. Compilation failures surface here too, before
    /// any traversal starts.
    pub fn with_custom(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut set = Self::builtin();

        for pattern in patterns {
            if pattern.is_empty() {
                return Err(ConfigError::EmptyPattern);
            }
            set.matchers.push(KeywordMatcher::new(pattern.clone(), pattern)?);
        }

        Ok(set)
    }

    /// Matchers in configured order (built-ins first)
    pub fn matchers(&self) -> &[KeywordMatcher] {
        &self.matchers
    }

    /// Snapshot of (label, count) rows in configured order
    pub fn counts(&self) -> Vec<(String, u64)> {
        self.matchers
            .iter()
            .map(|m| (m.label.clone(), m.count()))
            .collect()
    }
}

fn builtin_pattern(keyword: &str) -> String {
    format!(r"\b{keyword}\b(\([^)]*\))?")
}
