// Summary counts for a merged document.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    pub file_count: usize,
    pub char_count: usize,
    pub line_count: usize,
}

/// `line_count` is the number of '\n' plus one, so an empty text and a
/// single unterminated line both report 1. Kept as-is for compatibility.
pub fn summarize(merged_text: &str, file_count: usize) -> MergeSummary {
    MergeSummary {
        file_count,
        char_count: merged_text.chars().count(),
        line_count: merged_text.matches('\n').count() + 1,
    }
}

/// 1234567 -> "1,234,567"
pub fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Files Merged: {} | Total Characters: {} | Total Lines: {}",
            with_thousands(self.file_count),
            with_thousands(self.char_count),
            with_thousands(self.line_count)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_reports_one_line() {
        let summary = summarize("", 0);
        assert_eq!(summary.line_count, 1);
        assert_eq!(summary.char_count, 0);
    }

    #[test]
    fn test_three_breaks_four_lines() {
        let summary = summarize("a\nb\nc\n", 2);
        assert_eq!(summary.line_count, 4);
        assert_eq!(summary.char_count, 6);
        assert_eq!(summary.file_count, 2);
    }

    #[test]
    fn test_chars_not_bytes() {
        assert_eq!(summarize("héllo", 1).char_count, 5);
    }

    #[test]
    fn test_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_display() {
        let summary = MergeSummary {
            file_count: 3,
            char_count: 12345,
            line_count: 7,
        };
        assert_eq!(
            summary.to_string(),
            "Files Merged: 3 | Total Characters: 12,345 | Total Lines: 7"
        );
    }
}
