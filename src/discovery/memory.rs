//! Memory file probes.
//!
//! Memory notes (`CLAUDE.md` and friends) are never header-parsed; their
//! preview covers the whole file. Rule files are memory too, but they may
//! carry a `paths:` filter in a header block, so their header is parsed.

use std::path::Path;

use crate::config::PreviewConfig;
use crate::core::{ArtifactDetail, ArtifactRecord, ScopeLevel};
use crate::util::{files_with_extension, resolve_path};

use super::locations::Locations;
use super::probe::{inspect_text, relative_display, HeaderPolicy};

/// Role labels for memory records.
pub mod labels {
    pub const ENTERPRISE: &str = "Enterprise Policy";
    pub const USER: &str = "User Memory";
    pub const USER_RULES: &str = "User Rules";
    pub const PROJECT: &str = "Project Memory";
    pub const PROJECT_RULES: &str = "Project Rules";
    pub const LOCAL: &str = "Local Memory";
}

/// Probe a single well-known memory file.
///
/// Always returns a record; `exists` is false when the file is missing.
pub fn probe_memory_file(
    path: &Path,
    scope: ScopeLevel,
    label: &str,
    description: &str,
    preview: &PreviewConfig,
) -> ArtifactRecord {
    let record = ArtifactRecord::new(
        scope,
        label,
        resolve_path(path),
        description,
        ArtifactDetail::Memory,
    );
    inspect_text(
        record,
        HeaderPolicy::Ignore,
        preview.memory_lines,
        preview.max_file_size,
    )
}

/// Probe the enterprise memory file.
pub fn probe_enterprise_memory(path: &Path, preview: &PreviewConfig) -> ArtifactRecord {
    probe_memory_file(
        path,
        ScopeLevel::Enterprise,
        labels::ENTERPRISE,
        "Organization-wide instructions (IT-managed)",
        preview,
    )
}

/// Probe the user memory file.
pub fn probe_user_memory(path: &Path, preview: &PreviewConfig) -> ArtifactRecord {
    probe_memory_file(
        path,
        ScopeLevel::User,
        labels::USER,
        "Personal preferences for all projects",
        preview,
    )
}

/// Probe the local (gitignored) memory file.
pub fn probe_local_memory(path: &Path, preview: &PreviewConfig) -> ArtifactRecord {
    probe_memory_file(
        path,
        ScopeLevel::Local,
        labels::LOCAL,
        "Personal project-specific preferences (gitignored)",
        preview,
    )
}

/// Probe the ancestor walk for memory files.
///
/// Returns records for existing candidates only, ordered from the topmost
/// ancestor down to the project root. Duplicates are not removed here.
pub fn probe_ancestor_memory(
    locations: &Locations,
    preview: &PreviewConfig,
) -> Vec<ArtifactRecord> {
    let root = &locations.project.root;

    locations
        .ancestor_memory_candidates()
        .into_iter()
        .filter(|candidate| candidate.exists())
        .map(|candidate| {
            let description = match relative_display(&candidate, root) {
                Some(rel) => format!("Project instructions: ./{rel}"),
                None => format!("Parent project instructions: {}", candidate.display()),
            };
            tracing::debug!(path = %candidate.display(), "ancestor memory file");
            probe_memory_file(
                &candidate,
                ScopeLevel::Project,
                labels::PROJECT,
                &description,
                preview,
            )
        })
        .collect()
}

/// Probe a rules directory for `*.md` files, recursively.
///
/// A missing directory yields no records.
pub fn probe_rules(
    dir: &Path,
    scope: ScopeLevel,
    preview: &PreviewConfig,
) -> Vec<ArtifactRecord> {
    let (label, prefix) = match scope {
        ScopeLevel::User | ScopeLevel::Enterprise => (labels::USER_RULES, "User rule"),
        ScopeLevel::Project | ScopeLevel::Local => (labels::PROJECT_RULES, "Project rule"),
    };

    files_with_extension(dir, "md", true)
        .into_iter()
        .map(|file| {
            let rel = relative_display(&file, dir).unwrap_or_else(|| file.display().to_string());
            let record = ArtifactRecord::new(
                scope,
                label,
                resolve_path(&file),
                format!("{prefix}: {rel}"),
                ArtifactDetail::Memory,
            );
            inspect_text(
                record,
                HeaderPolicy::PreviewFull,
                preview.memory_lines,
                preview.max_file_size,
            )
        })
        .collect()
}
