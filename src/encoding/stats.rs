// ============================================================================
// Encoding Statistics Module
//
// Tally of what the file reader did during one merge: which encodings were
// used, how many files needed the lossy fallback and how many could not be
// read at all. Printed in verbose mode and logged at the end of a run.
// ============================================================================

use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics collector for encoding operations
#[derive(Debug, Clone, Default, Serialize)]
pub struct EncodingStats {
    files_read: usize,
    encodings_used: BTreeMap<String, usize>,
    lossy_fallbacks: usize,
    read_failures: usize,
}

impl EncodingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file decoded cleanly with `encoding_name`
    pub fn record_decoded(&mut self, encoding_name: &str) {
        self.files_read += 1;
        *self
            .encodings_used
            .entry(encoding_name.to_string())
            .or_insert(0) += 1;
    }

    /// A file needed the lossy UTF-8 fallback
    pub fn record_lossy(&mut self) {
        self.files_read += 1;
        self.lossy_fallbacks += 1;
    }

    /// A file was replaced by sentinel text
    pub fn record_failure(&mut self) {
        self.read_failures += 1;
    }

    pub fn files_read(&self) -> usize {
        self.files_read
    }

    pub fn lossy_fallbacks(&self) -> usize {
        self.lossy_fallbacks
    }

    pub fn read_failures(&self) -> usize {
        self.read_failures
    }

    /// Most frequently used encoding, ties broken alphabetically
    pub fn most_common_encoding(&self) -> Option<&str> {
        self.encodings_used
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.as_str())
    }

    /// Check if every file decoded without loss
    pub fn is_clean(&self) -> bool {
        self.lossy_fallbacks == 0 && self.read_failures == 0
    }

    /// One-line summary for the log
    pub fn log_summary(&self) -> String {
        format!(
            "Encoding stats: {} file(s) read, {} encoding(s), {} lossy fallback(s), {} unreadable",
            self.files_read,
            self.encodings_used.len(),
            self.lossy_fallbacks,
            self.read_failures
        )
    }

    /// Print a tree-style summary to stdout
    pub fn print_summary(&self) {
        println!("\n📊 Encoding Summary:");
        println!("├─ Files read: {}", self.files_read);
        if !self.encodings_used.is_empty() {
            println!("├─ Encodings:");
            for (encoding, count) in &self.encodings_used {
                println!("│  ├─ {}: {} files", encoding, count);
            }
        }
        if let Some(most_common) = self.most_common_encoding() {
            println!("├─ Most common: {}", most_common);
        }
        println!("├─ Lossy fallbacks: {}", self.lossy_fallbacks);
        println!("├─ Unreadable files: {}", self.read_failures);
        println!("└─ Clean: {}", if self.is_clean() { "yes" } else { "no" });
    }
}
