//! Hook source probe.
//!
//! Hooks are not files of their own: they live under the `hooks` key of a
//! settings document. The payload is carried through untouched.

use std::path::Path;

use serde_json::Value;

use crate::core::{ArtifactDetail, ArtifactRecord, ScopeLevel};
use crate::util::{file_stats, load_json, resolve_path};

/// Key holding hook definitions in a settings document.
pub const HOOKS_KEY: &str = "hooks";

/// Pull the hooks payload out of a decoded settings document.
pub fn hooks_payload(document: &Value) -> Option<&Value> {
    document.as_object()?.get(HOOKS_KEY)
}

/// Probe one settings document for hooks.
///
/// Returns `None` unless the document exists, decodes, and has a `hooks` key.
pub fn probe_hooks(path: &Path, scope: ScopeLevel, max_file_size: u64) -> Option<ArtifactRecord> {
    if !path.exists() {
        return None;
    }

    let document = load_json(path, max_file_size).into_option()?;
    let Some(hooks) = hooks_payload(&document) else {
        tracing::debug!(path = %path.display(), "settings without hooks");
        return None;
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let record = ArtifactRecord::new(
        scope,
        scope.as_str(),
        resolve_path(path),
        format!("Hooks from {file_name}"),
        ArtifactDetail::Hooks {
            hooks: hooks.clone(),
        },
    )
    .with_stats(file_stats(path));

    Some(record)
}
