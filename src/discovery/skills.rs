//! Skill probe.
//!
//! Each immediate subdirectory of a skills directory is one skill, provided
//! it holds a `SKILL.md` manifest. The manifest's header is parsed and the
//! preview covers the body after it.

use std::path::Path;

use crate::config::PreviewConfig;
use crate::core::{ArtifactDetail, ArtifactRecord, ScopeLevel};
use crate::util::{resolve_path, sorted_subdirs};

use super::locations::SKILL_MANIFEST;
use super::probe::{describe_from_header, inspect_text, HeaderPolicy};

/// Description used when a manifest declares none.
pub const NO_DESCRIPTION: &str = "No description";

/// Probe a skills directory.
///
/// Subdirectories without a manifest are skipped. A missing directory
/// yields no records.
pub fn probe_skills(
    dir: &Path,
    scope: ScopeLevel,
    preview: &PreviewConfig,
) -> Vec<ArtifactRecord> {
    let mut records = Vec::new();

    for skill_dir in sorted_subdirs(dir) {
        let manifest = skill_dir.join(SKILL_MANIFEST);
        if !manifest.is_file() {
            tracing::debug!(dir = %skill_dir.display(), "no skill manifest");
            continue;
        }

        let name = skill_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let record = ArtifactRecord::new(
            scope,
            scope.as_str(),
            resolve_path(&manifest),
            NO_DESCRIPTION,
            ArtifactDetail::Skill { name },
        );
        let record = inspect_text(
            record,
            HeaderPolicy::PreviewBody,
            preview.skill_lines,
            preview.max_file_size,
        );
        records.push(describe_from_header(record));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_skill(root: &Path, name: &str, content: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SKILL_MANIFEST), content).unwrap();
    }

    #[test]
    fn test_missing_skills_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let records = probe_skills(
            &temp.path().join("skills"),
            ScopeLevel::User,
            &PreviewConfig::default(),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_skills_sorted_and_named() {
        let temp = TempDir::new().unwrap();
        write_skill(
            temp.path(),
            "pdf",
            "---\nname: pdf-tools\ndescription: Work with PDFs\n---\nUse pdftotext.",
        );
        write_skill(temp.path(), "alpha", "No header here");
        fs::create_dir_all(temp.path().join("empty-dir")).unwrap();

        let records = probe_skills(temp.path(), ScopeLevel::Project, &PreviewConfig::default());
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].display_name(), Some("alpha"));
        assert_eq!(records[0].description, NO_DESCRIPTION);
        assert!(records[0].header.is_none());

        assert_eq!(records[1].display_name(), Some("pdf-tools"));
        assert_eq!(records[1].description, "Work with PDFs");
        assert_eq!(records[1].preview.as_deref(), Some("Use pdftotext."));
        assert_eq!(records[1].label, "Project");
        assert!(records[1].exists);
    }

    #[test]
    fn test_skill_preview_is_ten_lines() {
        let temp = TempDir::new().unwrap();
        let body: Vec<String> = (1..=12).map(|i| format!("step {i}")).collect();
        write_skill(
            temp.path(),
            "long",
            &format!("---\nname: long\n---\n{}", body.join("\n")),
        );

        let records = probe_skills(temp.path(), ScopeLevel::User, &PreviewConfig::default());
        let preview = records[0].preview.as_deref().unwrap();
        assert!(preview.starts_with("step 1\n"));
        assert!(preview.contains("step 10"));
        assert!(!preview.contains("step 11"));
        assert!(preview.ends_with("... (2 more lines)"));
    }

    #[test]
    fn test_unclosed_header_degrades_to_no_header() {
        let temp = TempDir::new().unwrap();
        write_skill(temp.path(), "broken", "---\nname: broken\nno closer");

        let records = probe_skills(temp.path(), ScopeLevel::User, &PreviewConfig::default());
        assert_eq!(records.len(), 1);
        assert!(records[0].header.is_none());
        assert_eq!(records[0].display_name(), Some("broken"));
        assert!(records[0].preview.as_deref().unwrap().starts_with("---"));
    }
}
