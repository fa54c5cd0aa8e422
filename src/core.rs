use crate::archive;
use crate::encoding::{EncodingStats, EncodingStrategy};
use crate::errors::{MergerError, MergerResult};
use crate::filter::is_eligible;
use crate::merge::{display_name, MergeEngine, MergeSpecification};
use crate::progress::ProgressTracker;
use crate::reader::FileReader;
use crate::stats::{summarize, MergeSummary};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Where the files to merge come from
#[derive(Debug, Clone)]
pub enum MergeInput {
    /// Files already on disk, merged in this order
    Files(Vec<PathBuf>),
    /// A ZIP archive to expand first
    Archive(PathBuf),
}

/// Effective path list for a merge
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub paths: Vec<PathBuf>,
    /// Set when an archive was expanded; the caller removes it when done
    pub scratch_dir: Option<PathBuf>,
}

/// Final product of a merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDocument {
    pub output_name: String,
    pub text: String,
    pub summary: MergeSummary,
}

/// Turn a `MergeInput` into the ordered list of files to merge
pub fn resolve_input(input: MergeInput) -> MergerResult<ResolvedInput> {
    match input {
        MergeInput::Files(paths) => {
            if paths.is_empty() {
                return Err(MergerError::InputValidation(
                    "No input files given".to_string(),
                ));
            }
            for path in paths.iter().filter(|p| !is_eligible(p)) {
                warn!(
                    "{} does not have a recognized text extension, merging anyway",
                    path.display()
                );
            }
            Ok(ResolvedInput {
                paths,
                scratch_dir: None,
            })
        }
        MergeInput::Archive(archive_path) => {
            let expanded = archive::expand_file(&archive_path)?;
            if expanded.files.is_empty() {
                if let Err(e) = std::fs::remove_dir_all(&expanded.scratch_dir) {
                    warn!(
                        "Failed to remove scratch directory {}: {}",
                        expanded.scratch_dir.display(),
                        e
                    );
                }
                return Err(MergerError::InputValidation(format!(
                    "Archive {} contains no eligible text files",
                    archive_path.display()
                )));
            }
            info!(
                "Found {} eligible file(s) in {}",
                expanded.files.len(),
                archive_path.display()
            );
            Ok(ResolvedInput {
                paths: expanded.files,
                scratch_dir: Some(expanded.scratch_dir),
            })
        }
    }
}

// Runs merge specifications and keeps the encoding tally across them
pub struct ProcessingCore {
    engine: MergeEngine,
    show_progress: bool,
}

impl ProcessingCore {
    pub fn new(strategy: EncodingStrategy, show_progress: bool) -> Self {
        Self {
            engine: MergeEngine::new(FileReader::new(strategy)),
            show_progress,
        }
    }

    pub fn run(&mut self, spec: &MergeSpecification) -> MergedDocument {
        info!(
            "Merging {} file(s) into {}",
            spec.paths.len(),
            spec.output_name
        );

        let mut tracker = if self.show_progress {
            ProgressTracker::new(spec.paths.len())
        } else {
            ProgressTracker::hidden(spec.paths.len())
        };

        let text = self
            .engine
            .merge_with(&spec.paths, &spec.separator, |_, path, outcome| {
                tracker.file_done(&display_name(path), outcome.is_ok());
            });
        tracker.finish();

        let metrics = tracker.get_metrics();
        debug!(
            "Read {} file(s) in {:.2}s, {} failed",
            metrics.files_processed(),
            metrics.elapsed().as_secs_f64(),
            metrics.errors_count()
        );

        let summary = summarize(&text, spec.paths.len());
        info!("{}", summary);
        info!("{}", self.engine.stats().log_summary());

        MergedDocument {
            output_name: spec.output_name.clone(),
            text,
            summary,
        }
    }

    pub fn encoding_stats(&self) -> &EncodingStats {
        self.engine.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(dir: &TempDir, entries: &[(&str, &str)]) -> PathBuf {
        let path = dir.path().join("upload.zip");
        let mut writer = ZipWriter::new(fs::File::create(&path).unwrap());
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_run_archive_end_to_end() {
        let dir = TempDir::new().unwrap();
        let zip = write_zip(
            &dir,
            &[("b.py", "print('b')"), ("a.txt", "alpha"), ("x.exe", "MZ")],
        );

        let resolved = resolve_input(MergeInput::Archive(zip)).unwrap();
        let scratch = resolved.scratch_dir.clone().unwrap();
        assert_eq!(resolved.paths.len(), 2);

        let spec = MergeSpecification::new(resolved.paths).with_separator("\n--\n");
        let mut core = ProcessingCore::new(EncodingStrategy::AutoDetect, false);
        let doc = core.run(&spec);

        assert_eq!(
            doc.text,
            "\na.txt:\n------\nalpha\n--\n\nb.py:\n-----\nprint('b')"
        );
        assert_eq!(doc.summary.file_count, 2);
        assert_eq!(doc.summary.line_count, 9);
        assert_eq!(doc.summary.char_count, doc.text.chars().count());
        assert_eq!(core.encoding_stats().files_read(), 2);

        fs::remove_dir_all(scratch).unwrap();
    }

    #[test]
    fn test_resolve_files_keeps_order() {
        let paths = vec![PathBuf::from("z.txt"), PathBuf::from("a.txt")];
        let resolved = resolve_input(MergeInput::Files(paths.clone())).unwrap();
        assert_eq!(resolved.paths, paths);
        assert!(resolved.scratch_dir.is_none());
    }

    #[test]
    fn test_resolve_empty_files_rejected() {
        let result = resolve_input(MergeInput::Files(Vec::new()));
        assert!(matches!(result, Err(MergerError::InputValidation(_))));
    }

    #[test]
    fn test_archive_without_eligible_files() {
        let dir = TempDir::new().unwrap();
        let zip = write_zip(&dir, &[("setup.exe", "MZ"), ("README", "hi")]);
        let result = resolve_input(MergeInput::Archive(zip));
        assert!(matches!(result, Err(MergerError::InputValidation(_))));
    }

    #[test]
    fn test_corrupt_archive_is_fatal() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.zip");
        fs::write(&bogus, "PK but not really").unwrap();
        let result = resolve_input(MergeInput::Archive(bogus));
        assert!(matches!(result, Err(MergerError::Archive(_))));
    }
}
