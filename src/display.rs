use crate::file_utils::SourceFile;
use crate::stats::{with_thousands, MergeSummary};
use crossterm::style::Stylize;

// Console rendering of what the merge selected and produced
pub struct StatusDisplay {
    terminal_width: usize, // Width of the terminal
}

impl StatusDisplay {
    pub fn new() -> Self {
        let terminal_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);
        Self { terminal_width }
    }

    pub fn with_width(terminal_width: usize) -> Self {
        Self { terminal_width }
    }

    /// "1. name (1,234 bytes)" lines, numbered from 1
    pub fn file_list_lines(&self, files: &[SourceFile]) -> Vec<String> {
        files
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let missing = if file.exists { "" } else { " [missing]" };
                let line = format!(
                    "{}. {} ({} bytes){}",
                    i + 1,
                    file.name,
                    with_thousands(file.size as usize),
                    missing
                );
                self.truncate_message(&line)
            })
            .collect()
    }

    pub fn print_file_list(&self, files: &[SourceFile]) {
        println!("{}", format!("📁 {} files selected", files.len()).bold());
        for line in self.file_list_lines(files) {
            println!("{}", line);
        }
    }

    pub fn print_preview(&self, text: &str, limit: usize) {
        println!("{}", "Preview".bold());
        println!("{}", "─".repeat(self.terminal_width.min(80)));
        println!("{}", preview(text, limit));
        println!("{}", "─".repeat(self.terminal_width.min(80)));
    }

    pub fn print_summary(&self, summary: &MergeSummary) {
        println!("{}", "✅ Files merged successfully!".green());
        println!("  Files Merged:     {}", with_thousands(summary.file_count));
        println!("  Total Characters: {}", with_thousands(summary.char_count));
        println!("  Total Lines:      {}", with_thousands(summary.line_count));
    }

    // Truncate the message if it exceeds the terminal width
    fn truncate_message(&self, message: &str) -> String {
        if message.chars().count() > self.terminal_width && self.terminal_width > 3 {
            let kept: String = message.chars().take(self.terminal_width - 3).collect();
            format!("{}...", kept)
        } else {
            message.to_string()
        }
    }
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// First `limit` characters of `text`, with "..." appended when cut
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
