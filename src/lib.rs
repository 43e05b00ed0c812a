//! Census - context inventory for Claude Code sessions
//!
//! Census finds every context artifact that can shape a session: memory
//! files, rule files, skills, hooks, MCP server registrations, agents and
//! slash commands. It looks across the enterprise, user, project and local
//! scopes, in precedence order, and renders what it finds as a report.

pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod error;
pub mod report;
pub mod util;

pub use config::Config;
pub use core::{
    extract_header, ArtifactDetail, ArtifactKind, ArtifactRecord, FileStats, Header, KindCounts,
    ScopeLevel,
};
pub use discovery::{discover, Inventory, Locations, Platform};
pub use error::{CensusError, Probed, Result};
pub use report::{format_size, render, render_markdown, ReportFormat};

// CLI commands
pub use cli::ReportCommand;
