// ============================================================================
// Encoding Conversion Module
//
// Turns raw file bytes into UTF-8 text. Two modes:
// - strict: any malformed sequence for the source encoding is a failure
// - lossy: UTF-8 with malformed sequences replaced by U+FFFD, never fails
// ============================================================================

use super::default_encoding;
use encoding_rs::Encoding;

pub struct EncodingConverter;

impl EncodingConverter {
    /// Decode `bytes` as `source_encoding`, stripping a matching BOM.
    ///
    /// Returns `None` on the first malformed sequence.
    pub fn decode_strict(bytes: &[u8], source_encoding: &'static Encoding) -> Option<String> {
        let (decoded, had_errors) = source_encoding.decode_with_bom_removal(bytes);
        if had_errors {
            None
        } else {
            Some(decoded.into_owned())
        }
    }

    /// Decode `bytes` as UTF-8, replacing malformed sequences.
    ///
    /// The flag reports whether any replacement happened.
    pub fn decode_lossy(bytes: &[u8]) -> (String, bool) {
        let (decoded, had_errors) = default_encoding().decode_with_bom_removal(bytes);
        if had_errors {
            log::debug!(
                "Lossy {} decode replaced {} malformed sequence(s)",
                default_encoding().name(),
                Self::replacement_count(&decoded)
            );
        }
        (decoded.into_owned(), had_errors)
    }

    fn replacement_count(text: &str) -> usize {
        text.chars().filter(|&c| c == '\u{FFFD}').count()
    }
}
