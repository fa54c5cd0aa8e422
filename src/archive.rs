// ============================================================================
// Archive Expander
//
// Extracts a ZIP archive into a fresh scratch directory and returns the
// eligible files in a stable order (byte-wise ascending full path), so the
// merged output does not depend on the order entries were zipped in.
//
// The scratch directory belongs to the caller once `expand` returns; nothing
// here deletes it on success.
// ============================================================================

use crate::errors::ArchiveError;
use crate::filter::is_eligible;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;
use zip::ZipArchive;

const SCRATCH_PREFIX: &str = "mergemate-";

/// Result of a successful expansion
#[derive(Debug, Clone)]
pub struct ExpandedArchive {
    /// Directory holding every extracted entry
    pub scratch_dir: PathBuf,
    /// Eligible extracted files, sorted
    pub files: Vec<PathBuf>,
}

/// Expand an archive read from `reader` into a new scratch directory
pub fn expand<R: Read + Seek>(reader: R) -> Result<ExpandedArchive, ArchiveError> {
    let scratch_dir = create_scratch_dir()?;
    match expand_into(reader, &scratch_dir) {
        Ok(files) => Ok(ExpandedArchive { scratch_dir, files }),
        Err(e) => {
            // The caller never sees this directory, so it is ours to remove
            if let Err(cleanup) = std::fs::remove_dir_all(&scratch_dir) {
                warn!(
                    "Failed to remove scratch directory {}: {}",
                    scratch_dir.display(),
                    cleanup
                );
            }
            Err(e)
        }
    }
}

/// Expand the ZIP file at `path`
pub fn expand_file(path: &Path) -> Result<ExpandedArchive, ArchiveError> {
    let file = File::open(path).map_err(|source| ArchiveError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Expanding archive {}", path.display());
    expand(BufReader::new(file))
}

/// Extract every entry into `dir` and collect the eligible files
pub fn expand_into<R: Read + Seek>(reader: R, dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut archive = ZipArchive::new(reader)?;
    debug!("Extracting {} entries into {}", archive.len(), dir.display());
    archive.extract(dir)?;
    collect_eligible(dir)
}

/// Walk `dir` recursively and return eligible regular files, sorted
pub fn collect_eligible(dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_eligible(entry.path()) {
            files.push(entry.into_path());
        } else {
            debug!("Skipping ineligible file {}", entry.path().display());
        }
    }
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(files)
}

fn create_scratch_dir() -> Result<PathBuf, ArchiveError> {
    let path = std::env::temp_dir().join(format!("{}{}", SCRATCH_PREFIX, Uuid::new_v4()));
    std::fs::create_dir_all(&path).map_err(|source| ArchiveError::Scratch {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    fn names(expanded: &ExpandedArchive) -> Vec<String> {
        expanded
            .files
            .iter()
            .map(|p| {
                p.strip_prefix(&expanded.scratch_dir)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_expand_sorts_regardless_of_entry_order() {
        let zip = build_zip(&[("b.py", "print()"), ("a.txt", "a"), ("c.md", "# c")]);
        let expanded = expand(zip).unwrap();
        assert_eq!(names(&expanded), vec!["a.txt", "b.py", "c.md"]);
        std::fs::remove_dir_all(&expanded.scratch_dir).unwrap();
    }

    #[test]
    fn test_expand_filters_ineligible() {
        let zip = build_zip(&[
            ("tool.exe", "MZ"),
            ("LICENSE", "mit"),
            ("docs/", ""),
            ("docs/guide.MD", "guide"),
            ("notes.txt", "n"),
        ]);
        let expanded = expand(zip).unwrap();
        assert_eq!(names(&expanded), vec!["docs/guide.MD", "notes.txt"]);
        assert!(expanded.scratch_dir.join("tool.exe").is_file());
        std::fs::remove_dir_all(&expanded.scratch_dir).unwrap();
    }

    #[test]
    fn test_expand_preserves_nested_structure() {
        let zip = build_zip(&[("src/lib/deep.rs", "fn x() {}"), ("top.rs", "")]);
        let expanded = expand(zip).unwrap();
        assert_eq!(names(&expanded), vec!["src/lib/deep.rs", "top.rs"]);
        let deep = expanded.scratch_dir.join("src").join("lib").join("deep.rs");
        assert_eq!(std::fs::read_to_string(deep).unwrap(), "fn x() {}");
        std::fs::remove_dir_all(&expanded.scratch_dir).unwrap();
    }

    #[test]
    fn test_scratch_dirs_are_unique() {
        let first = expand(build_zip(&[("a.txt", "1")])).unwrap();
        let second = expand(build_zip(&[("a.txt", "1")])).unwrap();
        assert_ne!(first.scratch_dir, second.scratch_dir);
        std::fs::remove_dir_all(&first.scratch_dir).unwrap();
        std::fs::remove_dir_all(&second.scratch_dir).unwrap();
    }

    #[test]
    fn test_corrupt_archive_fails_closed() {
        let result = expand(Cursor::new(b"this is not a zip file".to_vec()));
        assert!(matches!(result, Err(ArchiveError::Extract(_))));
    }

    #[test]
    fn test_missing_archive_file() {
        let result = expand_file(Path::new("/no/such/upload.zip"));
        assert!(matches!(result, Err(ArchiveError::Open { .. })));
    }

    #[test]
    fn test_expand_into_given_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let files = expand_into(build_zip(&[("z.go", ""), ("y.ts", "")]), dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("y.ts"), dir.path().join("z.go")]);
    }
}
