//! Agent probe.

use std::path::Path;

use crate::config::PreviewConfig;
use crate::core::{ArtifactDetail, ArtifactRecord, ScopeLevel};
use crate::util::{files_with_extension, resolve_path};

use super::probe::{describe_from_header, inspect_text, HeaderPolicy};
use super::skills::NO_DESCRIPTION;

/// Probe an agents directory for `*.md` definitions, recursively.
///
/// The agent name is the file stem; a header `name` takes precedence when
/// displayed. A missing directory yields no records.
pub fn probe_agents(
    dir: &Path,
    scope: ScopeLevel,
    preview: &PreviewConfig,
) -> Vec<ArtifactRecord> {
    files_with_extension(dir, "md", true)
        .into_iter()
        .map(|file| {
            let name = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let record = ArtifactRecord::new(
                scope,
                scope.as_str(),
                resolve_path(&file),
                NO_DESCRIPTION,
                ArtifactDetail::Agent { name },
            );
            let record = inspect_text(
                record,
                HeaderPolicy::PreviewBody,
                preview.agent_lines,
                preview.max_file_size,
            );
            describe_from_header(record)
        })
        .collect()
}
