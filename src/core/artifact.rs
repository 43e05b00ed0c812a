//! Artifact records produced by discovery.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::header::Header;
use super::scope::ScopeLevel;

/// Kind of context artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// `CLAUDE.md` style memory notes and rule files.
    MemoryFile,
    /// `SKILL.md` manifests.
    Skill,
    /// `hooks` entries in settings documents.
    HookSource,
    /// MCP server registrations.
    ServerRegistration,
    /// Custom subagent definitions.
    Agent,
    /// Custom slash commands.
    Command,
}

impl ArtifactKind {
    /// All kinds in report order.
    pub const ALL: [ArtifactKind; 6] = [
        Self::MemoryFile,
        Self::Skill,
        Self::HookSource,
        Self::ServerRegistration,
        Self::Agent,
        Self::Command,
    ];

    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MemoryFile => "memory-file",
            Self::Skill => "skill",
            Self::HookSource => "hook-source",
            Self::ServerRegistration => "server-registration",
            Self::Agent => "agent",
            Self::Command => "command",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Size and modification time of an existing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, if the platform reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Local>>,
}

impl FileStats {
    /// Modification time as `YYYY-MM-DD HH:MM`.
    pub fn modified_display(&self) -> Option<String> {
        self.modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
    }
}

/// Kind-specific record fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArtifactDetail {
    /// Memory notes carry no extra fields.
    Memory,
    /// Skill named after its directory.
    Skill { name: String },
    /// Raw `hooks` payload, passed through uninterpreted.
    Hooks { hooks: serde_json::Value },
    /// Server map, passed through uninterpreted.
    Servers { servers: serde_json::Value },
    /// Agent named after its file stem.
    Agent { name: String },
    /// Slash command with its callable name and optional namespace.
    Command {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
    },
}

impl ArtifactDetail {
    /// The artifact kind this detail belongs to.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Memory => ArtifactKind::MemoryFile,
            Self::Skill { .. } => ArtifactKind::Skill,
            Self::Hooks { .. } => ArtifactKind::HookSource,
            Self::Servers { .. } => ArtifactKind::ServerRegistration,
            Self::Agent { .. } => ArtifactKind::Agent,
            Self::Command { .. } => ArtifactKind::Command,
        }
    }
}

/// One discovered artifact.
///
/// Records are built once by a probe and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactRecord {
    /// Artifact kind.
    pub kind: ArtifactKind,
    /// Scope the artifact was found in.
    pub scope: ScopeLevel,
    /// Short role label, e.g. "Project Memory" or "User Rules".
    pub label: String,
    /// Absolute path, resolved through symlinks when the file exists.
    pub path: PathBuf,
    /// Whether the file exists.
    pub exists: bool,
    /// Size and modification time, present only for existing files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<FileStats>,
    /// Human-readable description of the artifact's role.
    pub description: String,
    /// Parsed header block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    /// Bounded excerpt of the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Kind-specific fields.
    pub detail: ArtifactDetail,
}

impl ArtifactRecord {
    /// Start a record for `path` with the given detail.
    ///
    /// Existence and stats start empty; probes fill them in.
    pub fn new(
        scope: ScopeLevel,
        label: impl Into<String>,
        path: impl Into<PathBuf>,
        description: impl Into<String>,
        detail: ArtifactDetail,
    ) -> Self {
        Self {
            kind: detail.kind(),
            scope,
            label: label.into(),
            path: path.into(),
            exists: false,
            stats: None,
            description: description.into(),
            header: None,
            preview: None,
            detail,
        }
    }

    /// Record that the file exists, with its stats when available.
    pub fn with_stats(mut self, stats: Option<FileStats>) -> Self {
        self.exists = true;
        self.stats = stats;
        self
    }

    /// Attach a parsed header.
    pub fn with_header(mut self, header: Option<Header>) -> Self {
        self.header = header;
        self
    }

    /// Attach a body preview.
    pub fn with_preview(mut self, preview: Option<String>) -> Self {
        self.preview = preview;
        self
    }

    /// Look up a header value.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header.as_ref().and_then(|h| h.get(key))
    }

    /// Name to display for the artifact.
    ///
    /// Skills and agents prefer the header's declared `name` over the name
    /// derived from the filesystem. Commands always use their callable name.
    pub fn display_name(&self) -> Option<&str> {
        match &self.detail {
            ArtifactDetail::Skill { name } | ArtifactDetail::Agent { name } => {
                Some(self.header_value("name").unwrap_or(name))
            }
            ArtifactDetail::Command { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Namespace of a command, if nested.
    pub fn namespace(&self) -> Option<&str> {
        match &self.detail {
            ArtifactDetail::Command { namespace, .. } => namespace.as_deref(),
            _ => None,
        }
    }
}

/// Per-kind totals for a discovery run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    /// Memory files that exist.
    pub memory_files: usize,
    /// Skills found.
    pub skills: usize,
    /// Settings documents with hooks.
    pub hook_sources: usize,
    /// Documents with server registrations.
    pub server_sources: usize,
    /// Agents found.
    pub agents: usize,
    /// Commands found.
    pub commands: usize,
}

impl KindCounts {
    /// Tally a sequence of records.
    ///
    /// Memory records for missing files are listed for reference but not
    /// counted.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a ArtifactRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.kind {
                ArtifactKind::MemoryFile => {
                    if record.exists {
                        counts.memory_files += 1;
                    }
                }
                ArtifactKind::Skill => counts.skills += 1,
                ArtifactKind::HookSource => counts.hook_sources += 1,
                ArtifactKind::ServerRegistration => counts.server_sources += 1,
                ArtifactKind::Agent => counts.agents += 1,
                ArtifactKind::Command => counts.commands += 1,
            }
        }
        counts
    }

    /// Count for one kind.
    pub fn get(&self, kind: ArtifactKind) -> usize {
        match kind {
            ArtifactKind::MemoryFile => self.memory_files,
            ArtifactKind::Skill => self.skills,
            ArtifactKind::HookSource => self.hook_sources,
            ArtifactKind::ServerRegistration => self.server_sources,
            ArtifactKind::Agent => self.agents,
            ArtifactKind::Command => self.commands,
        }
    }

    /// Sum over all kinds.
    pub fn total(&self) -> usize {
        ArtifactKind::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, header: Option<Header>) -> ArtifactRecord {
        ArtifactRecord::new(
            ScopeLevel::User,
            "User",
            format!("/home/u/.claude/skills/{name}/SKILL.md"),
            "Skill",
            ArtifactDetail::Skill {
                name: name.to_string(),
            },
        )
        .with_stats(None)
        .with_header(header)
    }

    #[test]
    fn test_new_record_defaults() {
        let record = ArtifactRecord::new(
            ScopeLevel::Local,
            "Local Memory",
            "/p/CLAUDE.local.md",
            "Personal",
            ArtifactDetail::Memory,
        );
        assert_eq!(record.kind, ArtifactKind::MemoryFile);
        assert!(!record.exists);
        assert!(record.stats.is_none());
        assert!(record.header.is_none());
        assert!(record.preview.is_none());
    }

    #[test]
    fn test_display_name_prefers_header() {
        let header: Header = [("name", "pdf-tools")].into_iter().collect();
        assert_eq!(skill("pdf", Some(header)).display_name(), Some("pdf-tools"));
        assert_eq!(skill("pdf", None).display_name(), Some("pdf"));
    }

    #[test]
    fn test_command_name_and_namespace() {
        let record = ArtifactRecord::new(
            ScopeLevel::Project,
            "Project",
            "/p/.claude/commands/git/commit.md",
            "Command",
            ArtifactDetail::Command {
                name: "/commit".to_string(),
                namespace: Some("git".to_string()),
            },
        );
        assert_eq!(record.kind, ArtifactKind::Command);
        assert_eq!(record.display_name(), Some("/commit"));
        assert_eq!(record.namespace(), Some("git"));
    }

    #[test]
    fn test_tally_counts_existing_memory_only() {
        let missing = ArtifactRecord::new(
            ScopeLevel::User,
            "User Memory",
            "/u/CLAUDE.md",
            "",
            ArtifactDetail::Memory,
        );
        let present = missing.clone().with_stats(None);
        let records = vec![missing, present, skill("a", None), skill("b", None)];

        let counts = KindCounts::tally(&records);
        assert_eq!(counts.memory_files, 1);
        assert_eq!(counts.skills, 2);
        assert_eq!(counts.get(ArtifactKind::Agent), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_record_serialization() {
        let record = ArtifactRecord::new(
            ScopeLevel::Project,
            "Project",
            "/p/.mcp.json",
            "MCP servers",
            ArtifactDetail::Servers {
                servers: serde_json::json!({"foo": {"command": "foo-server"}}),
            },
        )
        .with_stats(None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "server_registration");
        assert_eq!(json["scope"], "project");
        assert_eq!(json["detail"]["type"], "servers");
        assert_eq!(json["detail"]["servers"]["foo"]["command"], "foo-server");
        assert!(json.get("header").is_none());
    }

    #[test]
    fn test_modified_display_format() {
        use chrono::TimeZone;
        let stats = FileStats {
            size: 10,
            modified: Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).single(),
        };
        assert_eq!(stats.modified_display().as_deref(), Some("2024-03-05 09:07"));
    }
}
