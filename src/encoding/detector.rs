// ============================================================================
// Encoding Detection Module
//
// Best-effort guess of a file's character encoding. Detection never fails:
// anything inconclusive or unreadable maps to the default (UTF-8).
//
// Detection order:
// 1. Empty input is UTF-8
// 2. A byte-order mark names the encoding outright
// 3. Bytes that validate as UTF-8 (including pure ASCII) are UTF-8
// 4. Otherwise chardetng picks among the legacy encodings
// ============================================================================

use super::default_encoding;
use chardetng::EncodingDetector as CharDetector;
use encoding_rs::Encoding;
use log::debug;
use std::path::Path;

pub struct EncodingDetector;

impl EncodingDetector {
    /// Guess the encoding of a complete byte buffer
    pub fn detect(bytes: &[u8]) -> &'static Encoding {
        if bytes.is_empty() {
            return default_encoding();
        }

        if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
            return encoding;
        }

        if std::str::from_utf8(bytes).is_ok() {
            return default_encoding();
        }

        Self::detect_with_chardetng(bytes)
    }

    /// Read the whole file and guess its encoding. Read errors are
    /// swallowed and yield the default encoding.
    pub fn detect_file(path: &Path) -> &'static Encoding {
        match std::fs::read(path) {
            Ok(bytes) => Self::detect(&bytes),
            Err(e) => {
                debug!(
                    "Could not read {} for encoding detection ({}), assuming {}",
                    path.display(),
                    e,
                    default_encoding().name()
                );
                default_encoding()
            }
        }
    }

    /// UTF-8 was already ruled out, so don't let chardetng suggest it
    fn detect_with_chardetng(bytes: &[u8]) -> &'static Encoding {
        let mut detector = CharDetector::new();
        detector.feed(bytes, true);
        detector.guess(None, false)
    }
}
