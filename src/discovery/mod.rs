//! Discovery module for Census.
//!
//! This module handles detection of every context artifact kind:
//! - Memory files and rule files
//! - Skills
//! - Hook sources in settings documents
//! - MCP server registrations
//! - Agents and slash commands
//!
//! Locations are resolved once per run from the config. Every probe is
//! best-effort: a missing or broken file never stops the scan.

pub mod agents;
pub mod commands;
pub mod hooks;
pub mod inventory;
pub mod locations;
pub mod memory;
pub mod probe;
pub mod servers;
pub mod skills;

pub use agents::probe_agents;
pub use commands::{command_name, command_namespace, probe_commands, COMMAND_MARKER};
pub use hooks::{hooks_payload, probe_hooks, HOOKS_KEY};
pub use inventory::{discover, Inventory};
pub use locations::{
    EnterpriseLocations, LocalLocations, Locations, Platform, ProjectLocations, UserLocations,
};
pub use memory::{
    probe_ancestor_memory, probe_enterprise_memory, probe_local_memory, probe_memory_file,
    probe_rules, probe_user_memory,
};
pub use probe::{inspect_text, HeaderPolicy};
pub use servers::{probe_servers, ServerDocument, SERVERS_KEY};
pub use skills::probe_skills;
