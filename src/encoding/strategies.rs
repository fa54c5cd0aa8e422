// ============================================================================
// Encoding Strategies Module
//
// Policy for choosing the encoding a file is first decoded with. Whatever
// the strategy picks, a strict decode failure still drops to the lossy
// UTF-8 fallback in the file reader.
// ============================================================================

use super::{encoding_for_label, EncodingDetector};
use crate::errors::ConfigError;
use encoding_rs::Encoding;
use std::fmt;

/// Strategy for determining file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingStrategy {
    /// Guess per file from its bytes
    #[default]
    AutoDetect,

    /// Use one encoding for every file
    ForceEncoding(&'static Encoding),
}

impl EncodingStrategy {
    /// Parse a CLI/config value: "auto" or any WHATWG encoding label
    pub fn from_label(label: &str) -> Result<Self, ConfigError> {
        if label.trim().eq_ignore_ascii_case("auto") {
            return Ok(EncodingStrategy::AutoDetect);
        }
        encoding_for_label(label)
            .map(EncodingStrategy::ForceEncoding)
            .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
    }

    /// Encoding for the first, strict decode attempt
    pub fn choose(&self, bytes: &[u8]) -> &'static Encoding {
        match self {
            EncodingStrategy::AutoDetect => EncodingDetector::detect(bytes),
            EncodingStrategy::ForceEncoding(enc) => enc,
        }
    }
}

impl fmt::Display for EncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingStrategy::AutoDetect => write!(f, "auto-detect"),
            EncodingStrategy::ForceEncoding(enc) => write!(f, "force {}", enc.name()),
        }
    }
}
