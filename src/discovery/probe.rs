//! Shared record building for file-backed artifacts.

use std::path::Path;

use crate::core::{extract_header, preview_non_empty, ArtifactRecord, Header};
use crate::util::{file_stats, read_text};

/// How a text artifact's header block is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Do not look for a header; preview the whole text.
    Ignore,
    /// Parse the header; preview the body after it.
    PreviewBody,
    /// Parse the header; preview the whole text, header included.
    PreviewFull,
}

/// Fill in existence, stats, header and preview for a text artifact.
///
/// A missing file leaves the record untouched. An unreadable or empty file
/// keeps its existence and stats but gets no header or preview.
pub fn inspect_text(
    record: ArtifactRecord,
    policy: HeaderPolicy,
    preview_lines: usize,
    max_file_size: u64,
) -> ArtifactRecord {
    if !record.path.exists() {
        return record;
    }

    let stats = file_stats(&record.path);
    let record = record.with_stats(stats);

    let Some(content) = read_text(&record.path, max_file_size).into_option() else {
        return record;
    };
    if content.is_empty() {
        return record;
    }

    match policy {
        HeaderPolicy::Ignore => {
            let preview = preview_non_empty(&content, preview_lines);
            record.with_preview(preview)
        }
        HeaderPolicy::PreviewBody => {
            let (header, body) = split_header(&record.path, &content);
            let preview = preview_non_empty(body, preview_lines);
            record.with_header(header).with_preview(preview)
        }
        HeaderPolicy::PreviewFull => {
            let (header, _) = split_header(&record.path, &content);
            let preview = preview_non_empty(&content, preview_lines);
            record.with_header(header).with_preview(preview)
        }
    }
}

fn split_header<'a>(path: &Path, content: &'a str) -> (Option<Header>, &'a str) {
    let extracted = extract_header(content);
    let header = extracted
        .header
        .log_degraded(&format!("header in {}", path.display()))
        .into_option();
    (header, extracted.body)
}

/// Replace the record's description with the header's `description`, if any.
pub fn describe_from_header(mut record: ArtifactRecord) -> ArtifactRecord {
    if let Some(description) = record
        .header
        .as_ref()
        .and_then(|h| h.get_non_empty("description"))
    {
        record.description = description.to_string();
    }
    record
}

/// Path of `path` relative to `base`, with `/` separators.
pub fn relative_display(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArtifactDetail, ScopeLevel};
    use std::fs;
    use tempfile::TempDir;

    fn record(path: &Path) -> ArtifactRecord {
        ArtifactRecord::new(
            ScopeLevel::Project,
            "Project",
            path,
            "test",
            ArtifactDetail::Memory,
        )
    }

    #[test]
    fn test_missing_file_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.md");
        let inspected = inspect_text(record(&path), HeaderPolicy::Ignore, 5, 1024);
        assert!(!inspected.exists);
        assert!(inspected.stats.is_none());
        assert!(inspected.preview.is_none());
    }

    #[test]
    fn test_ignore_policy_previews_full_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CLAUDE.md");
        fs::write(&path, "---\nname: x\n---\nbody").unwrap();

        let inspected = inspect_text(record(&path), HeaderPolicy::Ignore, 5, 1024);
        assert!(inspected.exists);
        assert_eq!(inspected.stats.as_ref().unwrap().size, 20);
        assert!(inspected.header.is_none());
        assert_eq!(inspected.preview.as_deref(), Some("---\nname: x\n---\nbody"));
    }

    #[test]
    fn test_preview_body_policy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("SKILL.md");
        fs::write(&path, "---\nname: x\n---\nbody").unwrap();

        let inspected = inspect_text(record(&path), HeaderPolicy::PreviewBody, 5, 1024);
        assert_eq!(inspected.header_value("name"), Some("x"));
        assert_eq!(inspected.preview.as_deref(), Some("body"));
    }

    #[test]
    fn test_preview_full_policy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rule.md");
        fs::write(&path, "---\npaths: src/**\n---\nrule").unwrap();

        let inspected = inspect_text(record(&path), HeaderPolicy::PreviewFull, 5, 1024);
        assert_eq!(inspected.header_value("paths"), Some("src/**"));
        assert!(inspected.preview.unwrap().starts_with("---"));
    }

    #[test]
    fn test_unreadable_file_keeps_existence() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("binary.md");
        fs::write(&path, [0xffu8, 0xfe, 0x00]).unwrap();

        let inspected = inspect_text(record(&path), HeaderPolicy::PreviewBody, 5, 1024);
        assert!(inspected.exists);
        assert!(inspected.stats.is_some());
        assert!(inspected.header.is_none());
        assert!(inspected.preview.is_none());
    }

    #[test]
    fn test_oversized_file_has_no_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.md");
        fs::write(&path, "x".repeat(64)).unwrap();

        let inspected = inspect_text(record(&path), HeaderPolicy::Ignore, 5, 10);
        assert!(inspected.exists);
        assert!(inspected.preview.is_none());
    }

    #[test]
    fn test_empty_file_has_no_preview() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.md");
        fs::write(&path, "").unwrap();

        let inspected = inspect_text(record(&path), HeaderPolicy::PreviewBody, 5, 1024);
        assert!(inspected.exists);
        assert!(inspected.header.is_none());
        assert!(inspected.preview.is_none());
    }

    #[test]
    fn test_describe_from_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("agent.md");
        fs::write(&path, "---\ndescription: Reviews code\n---\nbody").unwrap();

        let inspected = inspect_text(record(&path), HeaderPolicy::PreviewBody, 5, 1024);
        assert_eq!(describe_from_header(inspected).description, "Reviews code");

        let blank = record(&path).with_header(Some([("description", "")].into_iter().collect()));
        assert_eq!(describe_from_header(blank).description, "test");
    }

    #[test]
    fn test_relative_display() {
        let base = Path::new("/p/.claude/commands");
        assert_eq!(
            relative_display(Path::new("/p/.claude/commands/git/push"), base).as_deref(),
            Some("git/push")
        );
        assert_eq!(relative_display(Path::new("/elsewhere"), base), None);
    }
}
