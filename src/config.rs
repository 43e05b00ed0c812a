//! Configuration loading for Census.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.census/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. A run with no config probes the standard
//! locations under the current user's home directory.
//!
//! The resulting [`Config`] is built once per run and passed explicitly to
//! the location resolver, so tests can point discovery at synthetic roots.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CensusError, FailOpen, Result};

/// Main configuration struct for Census.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Filesystem location overrides.
    pub paths: PathsConfig,
    /// Preview limits.
    pub preview: PreviewConfig,
}

/// Filesystem location overrides.
///
/// Every field defaults to `None`, meaning "derive from the environment".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Home directory used for user-level locations.
    pub home: Option<PathBuf>,
    /// User-level claude directory (defaults to `<home>/.claude`).
    pub claude_dir: Option<PathBuf>,
    /// Enterprise policy directory (defaults to the platform location).
    pub enterprise_dir: Option<PathBuf>,
    /// Platform name used to pick enterprise locations.
    pub platform: Option<String>,
}

/// Preview limits for each artifact kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Lines shown for memory and rule files.
    pub memory_lines: usize,
    /// Lines shown for skill bodies.
    pub skill_lines: usize,
    /// Lines shown for agent bodies.
    pub agent_lines: usize,
    /// Lines shown for command bodies.
    pub command_lines: usize,
    /// Files larger than this are recorded without content.
    pub max_file_size: u64,
}

/// Default maximum size of a file read for previews (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            memory_lines: 15,
            skill_lines: 10,
            agent_lines: 10,
            command_lines: 8,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        config.apply_env_overrides();
        config
    }

    /// Load user config from `<census_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let path = census_home()?.join("config.toml");
        if !path.is_file() {
            return None;
        }
        Self::load_from_file(&path)
            .map(Some)
            .fail_open_default("ignoring user config")
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| CensusError::unreadable(path, e))?;
        toml::from_str(&content).map_err(|e| CensusError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // CLAUDE_CONFIG_DIR
        if let Some(dir) = non_empty_env("CLAUDE_CONFIG_DIR") {
            self.paths.claude_dir = Some(PathBuf::from(dir));
        }

        // CENSUS_ENTERPRISE_DIR
        if let Some(dir) = non_empty_env("CENSUS_ENTERPRISE_DIR") {
            self.paths.enterprise_dir = Some(PathBuf::from(dir));
        }

        // CENSUS_PLATFORM
        if let Some(platform) = non_empty_env("CENSUS_PLATFORM") {
            self.paths.platform = Some(platform);
        }

        // CENSUS_PREVIEW_LINES
        if let Ok(val) = env::var("CENSUS_PREVIEW_LINES") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => self.preview.memory_lines = n,
                _ => tracing::warn!(
                    "Invalid CENSUS_PREVIEW_LINES value '{}'. \
                    Expected a positive integer. Using '{}'.",
                    val,
                    self.preview.memory_lines
                ),
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// Path overrides from `other` win when set. Preview limits are taken
    /// field by field when they differ from the defaults, so a layer only
    /// needs to name its customizations.
    fn merge(mut self, other: Config) -> Self {
        if other.paths.home.is_some() {
            self.paths.home = other.paths.home;
        }
        if other.paths.claude_dir.is_some() {
            self.paths.claude_dir = other.paths.claude_dir;
        }
        if other.paths.enterprise_dir.is_some() {
            self.paths.enterprise_dir = other.paths.enterprise_dir;
        }
        if other.paths.platform.is_some() {
            self.paths.platform = other.paths.platform;
        }

        let defaults = PreviewConfig::default();
        if other.preview.memory_lines != defaults.memory_lines {
            self.preview.memory_lines = other.preview.memory_lines;
        }
        if other.preview.skill_lines != defaults.skill_lines {
            self.preview.skill_lines = other.preview.skill_lines;
        }
        if other.preview.agent_lines != defaults.agent_lines {
            self.preview.agent_lines = other.preview.agent_lines;
        }
        if other.preview.command_lines != defaults.command_lines {
            self.preview.command_lines = other.preview.command_lines;
        }
        if other.preview.max_file_size != defaults.max_file_size {
            self.preview.max_file_size = other.preview.max_file_size;
        }

        self
    }

    /// Home directory for user-level locations.
    ///
    /// Uses the configured override, then the OS home directory, then the
    /// current directory as a last resort.
    pub fn home_dir(&self) -> PathBuf {
        if let Some(home) = &self.paths.home {
            return home.clone();
        }
        dirs::home_dir().unwrap_or_else(|| {
            tracing::warn!("home directory unavailable, using current directory");
            PathBuf::from(".")
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get the Census home directory.
///
/// Checks `CENSUS_HOME` first, then falls back to `~/.census`.
pub fn census_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("CENSUS_HOME") {
        if home.is_empty() {
            tracing::warn!("CENSUS_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".census"))
}
