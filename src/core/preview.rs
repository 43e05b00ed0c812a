//! Bounded text previews.

/// Build a preview of the first `max_lines` lines of `content`.
///
/// Content that fits is returned unchanged. Longer content is cut to
/// `max_lines` lines followed by a `... (k more lines)` marker. A trailing
/// newline does not count as an extra line.
pub fn preview(content: &str, max_lines: usize) -> String {
    let total = content.lines().count();
    if total <= max_lines {
        return content.to_string();
    }

    let mut out = content
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&format!("\n... ({} more lines)", total - max_lines));
    out
}

/// Preview non-empty content. Empty content has no preview.
pub fn preview_non_empty(content: &str, max_lines: usize) -> Option<String> {
    (!content.is_empty()).then(|| preview(content, max_lines))
}
