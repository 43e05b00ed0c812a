//! Slash command probe.
//!
//! Commands live as `*.md` files under a commands directory, optionally
//! nested in subdirectories that act as namespaces. `git/commit.md` is the
//! command `/commit` in namespace `git`.

use std::path::Path;

use crate::config::PreviewConfig;
use crate::core::{ArtifactDetail, ArtifactRecord, ScopeLevel};
use crate::util::{files_with_extension, resolve_path};

use super::probe::{describe_from_header, inspect_text, relative_display, HeaderPolicy};
use super::skills::NO_DESCRIPTION;

/// Prefix that makes a file stem callable.
pub const COMMAND_MARKER: char = '/';

/// Callable name for a command file.
pub fn command_name(file: &Path) -> String {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{COMMAND_MARKER}{stem}")
}

/// Namespace for a command file: its parent directory relative to `root`.
///
/// `None` when the file sits directly in `root`.
pub fn command_namespace(file: &Path, root: &Path) -> Option<String> {
    let parent = file.parent()?;
    relative_display(parent, root).filter(|ns| !ns.is_empty())
}

/// Probe a commands directory, recursively.
///
/// A missing directory yields no records.
pub fn probe_commands(
    dir: &Path,
    scope: ScopeLevel,
    preview: &PreviewConfig,
) -> Vec<ArtifactRecord> {
    files_with_extension(dir, "md", true)
        .into_iter()
        .map(|file| {
            let detail = ArtifactDetail::Command {
                name: command_name(&file),
                namespace: command_namespace(&file, dir),
            };
            let record = ArtifactRecord::new(
                scope,
                scope.as_str(),
                resolve_path(&file),
                NO_DESCRIPTION,
                detail,
            );
            let record = inspect_text(
                record,
                HeaderPolicy::PreviewBody,
                preview.command_lines,
                preview.max_file_size,
            );
            describe_from_header(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_command_name_and_namespace() {
        let root = Path::new("/p/.claude/commands");
        let nested = root.join("frontend/components/new.md");
        let flat = root.join("deploy.md");

        assert_eq!(command_name(&nested), "/new");
        assert_eq!(
            command_namespace(&nested, root).as_deref(),
            Some("frontend/components")
        );
        assert_eq!(command_name(&flat), "/deploy");
        assert_eq!(command_namespace(&flat, root), None);
    }

    #[test]
    fn test_probe_commands() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("git")).unwrap();
        fs::write(
            temp.path().join("git/commit.md"),
            "---\ndescription: Write a commit\nallowed-tools: Bash(git:*)\n---\nCommit staged changes.",
        )
        .unwrap();
        fs::write(temp.path().join("review.md"), "Review the diff.").unwrap();

        let records = probe_commands(temp.path(), ScopeLevel::Project, &PreviewConfig::default());
        assert_eq!(records.len(), 2);

        let commit = &records[0];
        assert_eq!(commit.display_name(), Some("/commit"));
        assert_eq!(commit.namespace(), Some("git"));
        assert_eq!(commit.description, "Write a commit");
        assert_eq!(commit.header_value("allowed-tools"), Some("Bash(git:*)"));

        let review = &records[1];
        assert_eq!(review.display_name(), Some("/review"));
        assert_eq!(review.namespace(), None);
        assert_eq!(review.preview.as_deref(), Some("Review the diff."));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_lists_each_command_once() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("go.md"), "go").unwrap();
        std::os::unix::fs::symlink(".", temp.path().join("loop")).unwrap();

        let records = probe_commands(temp.path(), ScopeLevel::Project, &PreviewConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name(), Some("/go"));
        assert_eq!(records[0].namespace(), None);
    }

    #[test]
    fn test_command_preview_is_eight_lines() {
        let temp = TempDir::new().unwrap();
        let body: Vec<String> = (1..=9).map(|i| format!("line {i}")).collect();
        fs::write(temp.path().join("long.md"), body.join("\n")).unwrap();

        let records = probe_commands(temp.path(), ScopeLevel::User, &PreviewConfig::default());
        let preview = records[0].preview.as_deref().unwrap();
        assert!(preview.contains("line 8"));
        assert!(!preview.contains("line 9"));
        assert!(preview.ends_with("... (1 more lines)"));
    }
}
