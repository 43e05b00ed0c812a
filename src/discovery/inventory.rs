//! Discovery aggregator.
//!
//! Runs every probe over every scope and collects the records into one
//! ordered inventory. Records are grouped by kind in report order; within a
//! kind they follow scope precedence, Enterprise first.
//!
//! Memory files are ordered Enterprise, User, user rules, the ancestor walk
//! from the topmost directory down to the project root, project rules, then
//! Local. The same file is never listed twice for one kind: a seen-set of
//! resolved paths is seeded with the user memory file, so an ancestor walk
//! that passes through the home directory does not list it again.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::{Config, PreviewConfig};
use crate::core::{ArtifactKind, ArtifactRecord, KindCounts, ScopeLevel};

use super::agents::probe_agents;
use super::commands::probe_commands;
use super::hooks::probe_hooks;
use super::locations::{Locations, Platform};
use super::memory::{
    probe_ancestor_memory, probe_enterprise_memory, probe_local_memory, probe_rules,
    probe_user_memory,
};
use super::servers::probe_servers;
use super::skills::probe_skills;

/// Result of one discovery run.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    /// Resolved project root.
    pub project_dir: PathBuf,
    /// Platform enterprise locations were resolved for.
    pub platform: Platform,
    /// When discovery ran.
    pub generated_at: DateTime<Local>,
    /// All records, grouped by kind, in precedence order.
    pub records: Vec<ArtifactRecord>,
    /// Per-kind totals.
    pub counts: KindCounts,
}

impl Inventory {
    /// Resolve locations for `project_dir` and run discovery.
    pub fn collect(config: &Config, project_dir: &Path) -> Self {
        let locations = Locations::resolve(config, project_dir);
        discover(&locations, &config.preview)
    }

    /// Records of one kind, in order.
    pub fn of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &ArtifactRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    /// Memory records for files that exist.
    pub fn existing_memory(&self) -> impl Iterator<Item = &ArtifactRecord> {
        self.of_kind(ArtifactKind::MemoryFile).filter(|r| r.exists)
    }
}

/// Records admitted so far, keyed by kind and resolved path.
#[derive(Debug, Default)]
struct SeenPaths {
    seen: HashSet<(ArtifactKind, PathBuf)>,
    records: Vec<ArtifactRecord>,
}

impl SeenPaths {
    /// Mark a path as seen without recording anything.
    fn seed(&mut self, kind: ArtifactKind, path: &Path) {
        self.seen.insert((kind, path.to_path_buf()));
    }

    /// Append a record unconditionally.
    fn push(&mut self, record: ArtifactRecord) {
        self.seed(record.kind, &record.path);
        self.records.push(record);
    }

    /// Append a record unless its path was already seen for its kind.
    fn admit(&mut self, record: ArtifactRecord) {
        if self.seen.insert((record.kind, record.path.clone())) {
            self.records.push(record);
        } else {
            tracing::debug!(
                kind = %record.kind,
                path = %record.path.display(),
                "skipping duplicate"
            );
        }
    }

    fn admit_all(&mut self, records: impl IntoIterator<Item = ArtifactRecord>) {
        for record in records {
            self.admit(record);
        }
    }

    fn into_records(self) -> Vec<ArtifactRecord> {
        self.records
    }
}

/// Run every probe over the resolved locations.
pub fn discover(locations: &Locations, preview: &PreviewConfig) -> Inventory {
    let mut seen = SeenPaths::default();
    let max = preview.max_file_size;
    let user = &locations.user;
    let project = &locations.project;

    tracing::debug!(
        project = %project.root.display(),
        platform = %locations.platform,
        "discovering"
    );

    // Memory
    let user_memory = probe_user_memory(&user.memory_file, preview);
    seen.seed(ArtifactKind::MemoryFile, &user_memory.path);
    if let Some(enterprise) = &locations.enterprise {
        seen.admit(probe_enterprise_memory(&enterprise.memory_file, preview));
    }
    seen.push(user_memory);
    seen.admit_all(probe_rules(&user.rules_dir, ScopeLevel::User, preview));
    seen.admit_all(probe_ancestor_memory(locations, preview));
    seen.admit_all(probe_rules(&project.rules_dir, ScopeLevel::Project, preview));
    seen.admit(probe_local_memory(&locations.local.memory_file, preview));

    // Skills
    seen.admit_all(probe_skills(&user.skills_dir, ScopeLevel::User, preview));
    seen.admit_all(probe_skills(&project.skills_dir, ScopeLevel::Project, preview));

    // Hooks
    let mut hook_sources = Vec::new();
    if let Some(enterprise) = &locations.enterprise {
        hook_sources.push((enterprise.settings.as_path(), ScopeLevel::Enterprise));
    }
    hook_sources.push((user.settings.as_path(), ScopeLevel::User));
    hook_sources.push((project.settings.as_path(), ScopeLevel::Project));
    hook_sources.push((locations.local.settings.as_path(), ScopeLevel::Local));
    seen.admit_all(
        hook_sources
            .into_iter()
            .filter_map(|(path, scope)| probe_hooks(path, scope, max)),
    );

    // Servers
    let mut server_sources = Vec::new();
    if let Some(enterprise) = &locations.enterprise {
        server_sources.push((enterprise.servers.as_path(), ScopeLevel::Enterprise));
    }
    server_sources.push((user.global_config.as_path(), ScopeLevel::User));
    server_sources.push((project.servers.as_path(), ScopeLevel::Project));
    seen.admit_all(
        server_sources
            .into_iter()
            .filter_map(|(path, scope)| probe_servers(path, scope, max)),
    );

    // Agents and commands
    seen.admit_all(probe_agents(&user.agents_dir, ScopeLevel::User, preview));
    seen.admit_all(probe_agents(&project.agents_dir, ScopeLevel::Project, preview));
    seen.admit_all(probe_commands(&user.commands_dir, ScopeLevel::User, preview));
    seen.admit_all(probe_commands(&project.commands_dir, ScopeLevel::Project, preview));

    let records = seen.into_records();
    let counts = KindCounts::tally(&records);

    tracing::info!(
        memory_files = counts.memory_files,
        skills = counts.skills,
        hook_sources = counts.hook_sources,
        server_sources = counts.server_sources,
        agents = counts.agents,
        commands = counts.commands,
        "discovery complete"
    );

    Inventory {
        project_dir: project.root.clone(),
        platform: locations.platform.clone(),
        generated_at: Local::now(),
        records,
        counts,
    }
}
