// ============================================================================
// File Reader
//
// Loads one file completely and decodes it to UTF-8:
//   1. choose an encoding (auto-detect or forced)
//   2. strict decode with that encoding
//   3. on malformed input, one lossy UTF-8 decode
// A file that cannot be read at all yields sentinel text instead of content,
// so one bad file never aborts a merge.
// ============================================================================

use crate::encoding::{EncodingConverter, EncodingStrategy};
use encoding_rs::Encoding;
use log::{debug, warn};
use std::path::Path;

/// Every sentinel substituted for unreadable content starts with this
pub const ERROR_MARKER: &str = "[Error";

/// Tagged result of reading one file
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// Content decoded. `lossy` means the UTF-8 fallback replaced bytes.
    Decoded {
        text: String,
        encoding: &'static Encoding,
        lossy: bool,
    },
    /// The file could not be read; `sentinel` is merged in its place
    Failed { sentinel: String },
}

impl ReadOutcome {
    /// Text to merge: the decoded content or the sentinel
    pub fn content(&self) -> &str {
        match self {
            ReadOutcome::Decoded { text, .. } => text,
            ReadOutcome::Failed { sentinel } => sentinel,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            ReadOutcome::Decoded { text, .. } => text,
            ReadOutcome::Failed { sentinel } => sentinel,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ReadOutcome::Decoded { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader {
    strategy: EncodingStrategy,
}

impl FileReader {
    pub fn new(strategy: EncodingStrategy) -> Self {
        Self { strategy }
    }

    pub fn read(&self, path: &Path) -> ReadOutcome {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return ReadOutcome::Failed {
                    sentinel: format!("{} reading {}: {}]", ERROR_MARKER, path.display(), e),
                };
            }
        };

        let encoding = self.strategy.choose(&bytes);
        if let Some(text) = EncodingConverter::decode_strict(&bytes, encoding) {
            debug!("Decoded {} as {}", path.display(), encoding.name());
            return ReadOutcome::Decoded {
                text,
                encoding,
                lossy: false,
            };
        }

        warn!(
            "{} is not valid {}, falling back to lossy UTF-8",
            path.display(),
            encoding.name()
        );
        let (text, lossy) = EncodingConverter::decode_lossy(&bytes);
        ReadOutcome::Decoded {
            text,
            encoding: crate::encoding::default_encoding(),
            lossy,
        }
    }
}

/// Read `path` with auto-detection; returns `(content, ok)`
pub fn read_file_content(path: &Path) -> (String, bool) {
    let outcome = FileReader::default().read(path);
    let ok = outcome.is_ok();
    (outcome.into_content(), ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_utf8() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("hello.txt");
        fs::write(&path, "héllo\nwörld")?;

        let outcome = FileReader::default().read(&path);
        assert!(outcome.is_ok());
        assert_eq!(outcome.content(), "héllo\nwörld");
        Ok(())
    }

    #[test]
    fn test_read_windows1252() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("legacy.txt");
        fs::write(&path, b"Le caf\xE9 est d\xE9j\xE0 pr\xEAt, tr\xE8s bien.")?;

        let (content, ok) = read_file_content(&path);
        assert!(ok);
        assert!(content.contains("café"));
        Ok(())
    }

    #[test]
    fn test_forced_encoding_falls_back_lossy() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("broken.txt");
        fs::write(&path, b"abc\xFFdef")?;

        let outcome = FileReader::new(EncodingStrategy::ForceEncoding(UTF_8)).read(&path);
        match outcome {
            ReadOutcome::Decoded { text, lossy, .. } => {
                assert!(lossy);
                assert_eq!(text, "abc\u{FFFD}def");
            }
            other => panic!("expected decoded outcome, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_forced_single_byte_encoding() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("forced.txt");
        fs::write(&path, b"na\xEFve")?;

        let outcome = FileReader::new(EncodingStrategy::ForceEncoding(WINDOWS_1252)).read(&path);
        assert_eq!(outcome.content(), "naïve");
        Ok(())
    }

    #[test]
    fn test_missing_file_yields_sentinel() {
        let (content, ok) = read_file_content(Path::new("/no/such/dir/missing.py"));
        assert!(!ok);
        assert!(content.starts_with(ERROR_MARKER));
        assert!(content.contains("missing.py"));
    }

    #[test]
    fn test_directory_yields_sentinel() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let outcome = FileReader::default().read(dir.path());
        assert!(!outcome.is_ok());
        assert!(outcome.content().starts_with("[Error reading "));
        Ok(())
    }
}
