// ============================================================================
// Encoding Module - Public API
//
// Everything mergemate knows about character encodings: guessing the
// encoding of a file's bytes, decoding with a lossy UTF-8 fallback, and
// tallying what happened across one merge.
//
// Uploaded files come from anywhere. Source files saved by old Windows
// editors are often Windows-1252, some are UTF-16 with a BOM, most are
// UTF-8. The merged document is always UTF-8.
// ============================================================================

use encoding_rs::{Encoding, UTF_8};

pub mod converter;
pub mod detector;
pub mod stats;
pub mod strategies;

pub use converter::EncodingConverter;
pub use detector::EncodingDetector;
pub use stats::EncodingStats;
pub use strategies::EncodingStrategy;

/// Encoding used whenever detection is inconclusive, and for the lossy
/// fallback decode.
pub fn default_encoding() -> &'static Encoding {
    UTF_8
}

/// Resolve a user supplied label ("latin1", "utf-16le", "cp1252", ...)
/// using the WHATWG label table.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}
