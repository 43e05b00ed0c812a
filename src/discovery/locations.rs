//! Location resolution for every scope.
//!
//! Computes the fixed set of files and directories to probe:
//! - **Enterprise**: platform policy directory (macOS, Linux, Windows)
//! - **User**: `~/.claude/` and `~/.claude.json`
//! - **Project**: the project root plus an ancestor walk for memory files
//! - **Local**: gitignored personal overrides in the project root
//!
//! Nothing here reads file contents. The only filesystem access is path
//! canonicalization of the project root.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{CensusError, Result};
use crate::util::resolve_path;

/// Memory file name used at every scope.
pub const MEMORY_FILE: &str = "CLAUDE.md";
/// Personal, gitignored memory file in the project root.
pub const LOCAL_MEMORY_FILE: &str = "CLAUDE.local.md";
/// Hidden configuration directory name.
pub const CONFIG_DIR: &str = ".claude";
/// Settings document name.
pub const SETTINGS_FILE: &str = "settings.json";
/// Local-only settings override.
pub const LOCAL_SETTINGS_FILE: &str = "settings.local.json";
/// Combined user-level config in the home directory.
pub const GLOBAL_CONFIG_FILE: &str = ".claude.json";
/// Project-level server registration document.
pub const PROJECT_SERVERS_FILE: &str = ".mcp.json";
/// Enterprise settings document.
pub const MANAGED_SETTINGS_FILE: &str = "managed-settings.json";
/// Enterprise server registration document.
pub const MANAGED_SERVERS_FILE: &str = "managed-mcp.json";
/// Skill manifest inside each skill directory.
pub const SKILL_MANIFEST: &str = "SKILL.md";

/// Operating platform, for enterprise locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// macOS.
    MacOs,
    /// Linux.
    Linux,
    /// Windows.
    Windows,
    /// Any other platform. Enterprise scope is empty.
    Unsupported(String),
}

impl Platform {
    /// The platform this binary runs on.
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS)
    }

    /// Parse a platform name. Unknown names map to `Unsupported`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "macos" | "darwin" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Unsupported(name) => name,
        }
    }

    /// Enterprise policy directory for this platform.
    ///
    /// # Errors
    ///
    /// `UnsupportedPlatform` for platforms without a known location.
    pub fn enterprise_dir(&self) -> Result<PathBuf> {
        match self {
            Self::MacOs => Ok(PathBuf::from("/Library/Application Support/ClaudeCode")),
            Self::Linux => Ok(PathBuf::from("/etc/claude-code")),
            Self::Windows => Ok(PathBuf::from("C:/Program Files/ClaudeCode")),
            Self::Unsupported(name) => Err(CensusError::unsupported_platform(name.clone())),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Platform {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Enterprise policy locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnterpriseLocations {
    /// Policy directory.
    pub dir: PathBuf,
    /// Organization-wide memory file.
    pub memory_file: PathBuf,
    /// Managed settings document.
    pub settings: PathBuf,
    /// Managed server registrations.
    pub servers: PathBuf,
}

impl EnterpriseLocations {
    fn new(dir: PathBuf) -> Self {
        Self {
            memory_file: dir.join(MEMORY_FILE),
            settings: dir.join(MANAGED_SETTINGS_FILE),
            servers: dir.join(MANAGED_SERVERS_FILE),
            dir,
        }
    }
}

/// User-level locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserLocations {
    /// User-level claude directory.
    pub dir: PathBuf,
    /// User memory file.
    pub memory_file: PathBuf,
    /// Rule files directory.
    pub rules_dir: PathBuf,
    /// Skills directory.
    pub skills_dir: PathBuf,
    /// Agents directory.
    pub agents_dir: PathBuf,
    /// Commands directory.
    pub commands_dir: PathBuf,
    /// Settings document.
    pub settings: PathBuf,
    /// Combined global config with server registrations.
    pub global_config: PathBuf,
}

impl UserLocations {
    fn new(dir: PathBuf, global_config: PathBuf) -> Self {
        Self {
            memory_file: dir.join(MEMORY_FILE),
            rules_dir: dir.join("rules"),
            skills_dir: dir.join("skills"),
            agents_dir: dir.join("agents"),
            commands_dir: dir.join("commands"),
            settings: dir.join(SETTINGS_FILE),
            global_config,
            dir,
        }
    }
}

/// Project-level locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLocations {
    /// Resolved project root.
    pub root: PathBuf,
    /// Project configuration directory.
    pub config_dir: PathBuf,
    /// Rule files directory.
    pub rules_dir: PathBuf,
    /// Skills directory.
    pub skills_dir: PathBuf,
    /// Agents directory.
    pub agents_dir: PathBuf,
    /// Commands directory.
    pub commands_dir: PathBuf,
    /// Shared settings document.
    pub settings: PathBuf,
    /// Server registration document.
    pub servers: PathBuf,
}

impl ProjectLocations {
    fn new(root: PathBuf) -> Self {
        let config_dir = root.join(CONFIG_DIR);
        Self {
            rules_dir: config_dir.join("rules"),
            skills_dir: config_dir.join("skills"),
            agents_dir: config_dir.join("agents"),
            commands_dir: config_dir.join("commands"),
            settings: config_dir.join(SETTINGS_FILE),
            servers: root.join(PROJECT_SERVERS_FILE),
            config_dir,
            root,
        }
    }
}

/// Local (personal, gitignored) locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalLocations {
    /// Personal memory file.
    pub memory_file: PathBuf,
    /// Local-only settings override.
    pub settings: PathBuf,
}

/// All locations to probe for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Locations {
    /// Platform the enterprise locations were chosen for.
    pub platform: Platform,
    /// Enterprise locations, absent on unsupported platforms.
    pub enterprise: Option<EnterpriseLocations>,
    /// User locations.
    pub user: UserLocations,
    /// Project locations.
    pub project: ProjectLocations,
    /// Local locations.
    pub local: LocalLocations,
}

impl Locations {
    /// Resolve every location for `project_dir` under `config`.
    ///
    /// An explicit `enterprise_dir` in the config wins over the platform
    /// default. Without one, an unsupported platform yields no enterprise
    /// locations.
    pub fn resolve(config: &Config, project_dir: &Path) -> Self {
        let platform = config
            .paths
            .platform
            .as_deref()
            .map(Platform::parse)
            .unwrap_or_else(Platform::current);

        let enterprise = match &config.paths.enterprise_dir {
            Some(dir) => Some(EnterpriseLocations::new(dir.clone())),
            None => match platform.enterprise_dir() {
                Ok(dir) => Some(EnterpriseLocations::new(dir)),
                Err(e) => {
                    tracing::debug!("enterprise scope empty: {}", e);
                    None
                }
            },
        };

        let home = config.home_dir();
        let user = match &config.paths.claude_dir {
            Some(dir) => UserLocations::new(dir.clone(), dir.join(GLOBAL_CONFIG_FILE)),
            None => UserLocations::new(home.join(CONFIG_DIR), home.join(GLOBAL_CONFIG_FILE)),
        };

        let root = resolve_path(project_dir);
        let local = LocalLocations {
            memory_file: root.join(LOCAL_MEMORY_FILE),
            settings: root.join(CONFIG_DIR).join(LOCAL_SETTINGS_FILE),
        };

        Self {
            platform,
            enterprise,
            user,
            project: ProjectLocations::new(root),
            local,
        }
    }

    /// Directories visited by the ancestor walk, project root first.
    ///
    /// Each ancestor appears exactly once. The walk stops before the
    /// filesystem root, which is never probed.
    pub fn ancestor_dirs(&self) -> Vec<PathBuf> {
        ancestor_dirs(&self.project.root)
    }

    /// Memory file candidates from the ancestor walk, topmost ancestor first.
    ///
    /// Within one directory, `CLAUDE.md` comes before `.claude/CLAUDE.md`.
    pub fn ancestor_memory_candidates(&self) -> Vec<PathBuf> {
        self.ancestor_dirs()
            .into_iter()
            .rev()
            .flat_map(|dir| memory_candidates(&dir))
            .collect()
    }
}

/// Ancestors of `root` (inclusive), closest first, excluding the filesystem root.
pub fn ancestor_dirs(root: &Path) -> Vec<PathBuf> {
    root.ancestors()
        .filter(|dir| dir.parent().is_some())
        .map(Path::to_path_buf)
        .collect()
}

/// The two memory file locations checked in each directory.
pub fn memory_candidates(dir: &Path) -> [PathBuf; 2] {
    [dir.join(MEMORY_FILE), dir.join(CONFIG_DIR).join(MEMORY_FILE)]
}
