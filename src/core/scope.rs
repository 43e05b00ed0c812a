//! Scope levels of the override hierarchy.

use serde::{Deserialize, Serialize};

/// One level of the override hierarchy.
///
/// Variants are declared in increasing precedence, so the derived ordering
/// matches override order: `Local > Project > User > Enterprise`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeLevel {
    /// Organization-wide policy managed by IT.
    Enterprise,
    /// The current user's home directory.
    User,
    /// The project directory and its ancestors.
    Project,
    /// Personal, gitignored overrides inside the project.
    Local,
}

impl ScopeLevel {
    /// Get the scope name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::User => "User",
            Self::Project => "Project",
            Self::Local => "Local",
        }
    }
}

impl std::fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
