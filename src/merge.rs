// ============================================================================
// Merge Engine
//
// Concatenates files in the order given, each preceded by a name header:
//
//   \n<name>:\n<'-' x (len(name) + 1)>\n<content>
//
// with the separator between consecutive files (never before the first or
// after the last). The order is taken as-is; only archive expansion sorts.
// ============================================================================

use crate::encoding::EncodingStats;
use crate::reader::{FileReader, ReadOutcome};
use lazy_static::lazy_static;
use log::debug;
use std::path::{Path, PathBuf};

/// Name used for the output when the caller doesn't pick one
pub const DEFAULT_OUTPUT_NAME: &str = "merged_files.txt";

lazy_static! {
    /// Line break, 80 '=' characters, line break
    pub static ref DEFAULT_SEPARATOR: String = format!("\n{}\n", "=".repeat(80));
}

/// Everything needed for one merge
#[derive(Debug, Clone)]
pub struct MergeSpecification {
    pub paths: Vec<PathBuf>,
    pub separator: String,
    pub output_name: String,
}

impl MergeSpecification {
    /// Default separator and output name
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            separator: DEFAULT_SEPARATOR.clone(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = output_name.into();
        self
    }
}

/// Base name shown in a header; the whole path if it has no file name
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Header placed before a file's content
pub fn header(name: &str) -> String {
    format!("\n{}:\n{}\n", name, "-".repeat(name.chars().count() + 1))
}

#[derive(Debug, Default)]
pub struct MergeEngine {
    reader: FileReader,
    stats: EncodingStats,
}

impl MergeEngine {
    pub fn new(reader: FileReader) -> Self {
        Self {
            reader,
            stats: EncodingStats::new(),
        }
    }

    /// Encoding tally across every merge run by this engine
    pub fn stats(&self) -> &EncodingStats {
        &self.stats
    }

    pub fn merge(&mut self, paths: &[PathBuf], separator: &str) -> String {
        self.merge_with(paths, separator, |_, _, _| {})
    }

    /// Like `merge`, calling `on_file(index, path, outcome)` after each read
    pub fn merge_with<F>(&mut self, paths: &[PathBuf], separator: &str, mut on_file: F) -> String
    where
        F: FnMut(usize, &Path, &ReadOutcome),
    {
        let mut merged = String::new();

        for (index, path) in paths.iter().enumerate() {
            if index > 0 {
                merged.push_str(separator);
            }

            merged.push_str(&header(&display_name(path)));

            let outcome = self.reader.read(path);
            match &outcome {
                ReadOutcome::Decoded {
                    encoding, lossy, ..
                } => {
                    if *lossy {
                        self.stats.record_lossy();
                    } else {
                        self.stats.record_decoded(encoding.name());
                    }
                }
                ReadOutcome::Failed { .. } => self.stats.record_failure(),
            }
            on_file(index, path, &outcome);
            merged.push_str(outcome.content());
        }

        debug!(
            "Merged {} file(s) into {} bytes",
            paths.len(),
            merged.len()
        );
        merged
    }
}

/// Merge with auto-detected encodings
pub fn merge_files(paths: &[PathBuf], separator: &str) -> String {
    MergeEngine::default().merge(paths, separator)
}
