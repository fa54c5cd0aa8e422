// Type filter: which files are eligible for merging, by extension only.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::path::Path;

lazy_static! {
    /// Recognized extensions, lowercase with the leading dot
    static ref TEXT_EXTENSIONS: HashSet<&'static str> = [
        ".txt", ".xml", ".java", ".py", ".js", ".html", ".css", ".json",
        ".md", ".yml", ".yaml", ".ini", ".cfg", ".conf", ".log", ".sql",
        ".c", ".cpp", ".h", ".hpp", ".cs", ".php", ".rb", ".go", ".rs",
        ".sh", ".bat", ".ps1", ".r", ".scala", ".kt", ".swift", ".dart",
        ".tsx", ".jsx", ".vue", ".svelte", ".ts", ".coffee", ".less",
        ".scss", ".sass", ".styl", ".pug", ".ejs", ".hbs", ".mustache",
    ]
    .into_iter()
    .collect();
}

/// Case-insensitive extension check against the allow-list
pub fn is_eligible(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(format!(".{}", ext.to_lowercase()).as_str()))
        .unwrap_or(false)
}

/// The allow-list, sorted
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions: Vec<_> = TEXT_EXTENSIONS.iter().copied().collect();
    extensions.sort_unstable();
    extensions
}
