//! Small formatting helpers for reports.

use std::path::Path;

const UNITS: [&str; 3] = ["B", "KB", "MB"];

/// Human-readable size in base 1024.
///
/// Bytes are shown without decimals, larger units with one.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return if unit == "B" {
                format!("{size:.0} {unit}")
            } else {
                format!("{size:.1} {unit}")
            };
        }
        size /= 1024.0;
    }
    format!("{size:.1} GB")
}

/// Markdown link to a local file.
pub fn file_link(path: &Path) -> String {
    format!("[{}](file://{})", path.display(), path.display())
}

/// Inline code span.
pub fn code(text: &str) -> String {
    format!("`{text}`")
}
