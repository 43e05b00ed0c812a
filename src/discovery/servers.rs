//! MCP server registration probe.
//!
//! Registrations come from three documents with slightly different shapes:
//! - the user's global config, where servers sit under `mcpServers`
//! - the project's `.mcp.json`, which may instead be a bare server map
//! - the enterprise managed file, which tries `mcpServers` first and falls
//!   back to the whole document

use std::path::Path;

use serde_json::Value;

use crate::core::{ArtifactDetail, ArtifactRecord, ScopeLevel};
use crate::util::{file_stats, load_json, resolve_path};

/// Key holding the server map.
pub const SERVERS_KEY: &str = "mcpServers";

/// Accepted shape of a server registration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerDocument {
    /// Servers only under `mcpServers`; other keys are unrelated config.
    Keyed,
    /// `mcpServers` if present, else the whole document is the server map.
    KeyedOrBare,
}

impl ServerDocument {
    /// Document shape accepted at a scope.
    pub fn for_scope(scope: ScopeLevel) -> Self {
        match scope {
            ScopeLevel::User => Self::Keyed,
            ScopeLevel::Enterprise | ScopeLevel::Project | ScopeLevel::Local => Self::KeyedOrBare,
        }
    }

    /// Extract the server map from a decoded document.
    ///
    /// Non-object documents and empty objects yield nothing.
    pub fn servers<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        let object = document.as_object()?;
        if object.is_empty() {
            return None;
        }
        match (object.get(SERVERS_KEY), self) {
            (Some(servers), _) => Some(servers),
            (None, Self::Keyed) => None,
            (None, Self::KeyedOrBare) => Some(document),
        }
    }
}

/// Probe one document for server registrations.
pub fn probe_servers(
    path: &Path,
    scope: ScopeLevel,
    max_file_size: u64,
) -> Option<ArtifactRecord> {
    if !path.exists() {
        return None;
    }

    let document = load_json(path, max_file_size).into_option()?;
    let shape = ServerDocument::for_scope(scope);
    let Some(servers) = shape.servers(&document) else {
        tracing::debug!(path = %path.display(), ?shape, "no server registrations");
        return None;
    };

    let count = servers.as_object().map_or(0, |m| m.len());
    tracing::debug!(path = %path.display(), count, "server registrations");

    let record = ArtifactRecord::new(
        scope,
        scope.as_str(),
        resolve_path(path),
        format!("{count} MCP server(s)"),
        ArtifactDetail::Servers {
            servers: servers.clone(),
        },
    )
    .with_stats(file_stats(path));

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const MAX: u64 = 1024 * 1024;

    fn servers_of(record: &ArtifactRecord) -> &Value {
        match &record.detail {
            ArtifactDetail::Servers { servers } => servers,
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn test_shapes() {
        let keyed = json!({"mcpServers": {"a": {"command": "a"}}, "theme": "dark"});
        let bare = json!({"foo": {"command": "foo"}});

        assert_eq!(
            ServerDocument::Keyed.servers(&keyed),
            Some(&json!({"a": {"command": "a"}}))
        );
        assert_eq!(ServerDocument::Keyed.servers(&bare), None);
        assert_eq!(ServerDocument::KeyedOrBare.servers(&bare), Some(&bare));
        assert_eq!(ServerDocument::KeyedOrBare.servers(&json!({})), None);
        assert_eq!(ServerDocument::KeyedOrBare.servers(&json!([1, 2])), None);
    }

    #[test]
    fn test_project_bare_map_fallback() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".mcp.json");
        fs::write(&path, r#"{"foo": {"command": "foo-server", "args": ["--stdio"]}}"#).unwrap();

        let record = probe_servers(&path, ScopeLevel::Project, MAX).unwrap();
        assert_eq!(
            servers_of(&record),
            &json!({"foo": {"command": "foo-server", "args": ["--stdio"]}})
        );
        assert_eq!(record.description, "1 MCP server(s)");
    }

    #[test]
    fn test_user_config_requires_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".claude.json");
        fs::write(&path, r#"{"numStartups": 3}"#).unwrap();
        assert!(probe_servers(&path, ScopeLevel::User, MAX).is_none());

        fs::write(
            &path,
            r#"{"numStartups": 3, "mcpServers": {"docs": {"type": "http", "url": "https://x"}}}"#,
        )
        .unwrap();
        let record = probe_servers(&path, ScopeLevel::User, MAX).unwrap();
        assert_eq!(servers_of(&record)["docs"]["type"], "http");
    }

    #[test]
    fn test_enterprise_prefers_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("managed-mcp.json");
        fs::write(&path, r#"{"mcpServers": {"corp": {"command": "corp"}}}"#).unwrap();

        let record = probe_servers(&path, ScopeLevel::Enterprise, MAX).unwrap();
        assert_eq!(servers_of(&record), &json!({"corp": {"command": "corp"}}));
    }

    #[test]
    fn test_malformed_document_skipped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".mcp.json");
        fs::write(&path, "{oops").unwrap();
        assert!(probe_servers(&path, ScopeLevel::Project, MAX).is_none());
    }
}
