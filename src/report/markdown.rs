//! Markdown report renderer.
//!
//! Renders an [`Inventory`] as a single markdown document: a summary table
//! followed by one section per artifact kind, in the order memory, skills,
//! hooks, MCP servers, agents, commands. Previews are wrapped in collapsible
//! `<details>` blocks.

use serde_json::Value;

use crate::core::{ArtifactDetail, ArtifactKind, ArtifactRecord};
use crate::discovery::Inventory;

use super::format::{code, file_link, format_size};

/// Report title.
pub const TITLE: &str = "# Context Introspection Report";

const RULE: &str = "---";

/// Render the full markdown report.
pub fn render_markdown(inventory: &Inventory) -> String {
    let mut md = String::new();

    md.push_str(&format!("{TITLE}\n\n"));
    md.push_str(&format!(
        "**Generated:** {}\n",
        inventory.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    md.push_str(&format!(
        "**Project:** {}\n",
        code(&inventory.project_dir.display().to_string())
    ));
    md.push_str(&format!("**Platform:** {}\n\n", inventory.platform));

    render_summary(&mut md, inventory);
    render_memory(&mut md, inventory);
    render_skills(&mut md, inventory);
    render_hooks(&mut md, inventory);
    render_servers(&mut md, inventory);
    render_agents(&mut md, inventory);
    render_commands(&mut md, inventory);
    render_resources(&mut md);

    md
}

fn render_summary(md: &mut String, inventory: &Inventory) {
    let counts = &inventory.counts;
    md.push_str("## Summary\n\n");
    md.push_str("| Category | Found |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!("| Memory files | {} |\n", counts.memory_files));
    md.push_str(&format!("| Skills | {} |\n", counts.skills));
    md.push_str(&format!("| Hook sources | {} |\n", counts.hook_sources));
    md.push_str(&format!("| MCP server sources | {} |\n", counts.server_sources));
    md.push_str(&format!("| Custom agents | {} |\n", counts.agents));
    md.push_str(&format!("| Custom commands | {} |\n\n", counts.commands));
}

fn section(md: &mut String, heading: &str) {
    md.push_str(&format!("{RULE}\n\n## {heading}\n\n"));
}

fn render_preview(md: &mut String, record: &ArtifactRecord, summary: &str) {
    let Some(preview) = &record.preview else {
        return;
    };
    md.push_str("\n<details>\n");
    md.push_str(&format!("<summary>{summary}</summary>\n\n"));
    md.push_str("```markdown\n");
    md.push_str(preview);
    md.push_str("\n```\n\n</details>\n");
}

/// Append `**label:** `value`` for a header key, if present and non-empty.
fn render_header_field(md: &mut String, record: &ArtifactRecord, key: &str, label: &str) {
    if let Some(value) = record.header.as_ref().and_then(|h| h.get_non_empty(key)) {
        md.push_str(&format!("**{label}:** {}\n", code(value)));
    }
}

fn render_not_found(md: &mut String, message: &str, locations: &[&str]) {
    md.push_str(&format!("*{message}*\n\n"));
    for line in locations {
        md.push_str(line);
        md.push('\n');
    }
    md.push('\n');
}

fn render_memory(md: &mut String, inventory: &Inventory) {
    section(md, "Memory Files (CLAUDE.md)");
    md.push_str("Memory files are loaded in order from enterprise → user → project → local.\n");
    md.push_str("Higher specificity takes precedence.\n\n");

    for record in inventory.of_kind(ArtifactKind::MemoryFile) {
        md.push_str(&format!("### {}\n\n", record.label));

        if record.exists {
            md.push_str(&format!("**Path:** {}\n", file_link(&record.path)));
            md.push_str(&format!("**Status:** {}\n", found_status(record)));
        } else {
            md.push_str(&format!(
                "**Path:** {}\n",
                code(&record.path.display().to_string())
            ));
            md.push_str("**Status:** Not found\n");
        }

        if !record.description.is_empty() {
            md.push_str(&format!("**Purpose:** {}\n", record.description));
        }
        render_header_field(md, record, "paths", "Path filter");
        render_preview(md, record, "Preview");
        md.push('\n');
    }
}

fn found_status(record: &ArtifactRecord) -> String {
    match &record.stats {
        Some(stats) => match stats.modified_display() {
            Some(modified) => format!("Found ({}, modified {})", format_size(stats.size), modified),
            None => format!("Found ({})", format_size(stats.size)),
        },
        None => "Found".to_string(),
    }
}

fn render_skills(md: &mut String, inventory: &Inventory) {
    section(md, "Skills");

    let mut skills = inventory.of_kind(ArtifactKind::Skill).peekable();
    if skills.peek().is_none() {
        render_not_found(
            md,
            "No skills found.",
            &[
                "Skills location:",
                "- User: `~/.claude/skills/*/SKILL.md`",
                "- Project: `.claude/skills/*/SKILL.md`",
            ],
        );
        return;
    }

    md.push_str("Skills are auto-invoked by Claude when requests match their descriptions.\n\n");
    for record in skills {
        render_named_heading(md, record, None);
        render_header_field(md, record, "allowed-tools", "Allowed tools");
        render_header_field(md, record, "model", "Model");
        render_preview(md, record, "Instructions preview");
        md.push('\n');
    }
}

fn render_named_heading(md: &mut String, record: &ArtifactRecord, namespace: Option<&str>) {
    let name = record.display_name().unwrap_or("unknown");
    let scope = match namespace {
        Some(ns) => format!("{}:{}", record.scope, ns),
        None => record.scope.to_string(),
    };
    md.push_str(&format!("### {name} ({scope})\n\n"));
    md.push_str(&format!("**Path:** {}\n", file_link(&record.path)));
    md.push_str(&format!("**Description:** {}\n", record.description));
}

fn render_hooks(md: &mut String, inventory: &Inventory) {
    section(md, "Hooks");

    let mut sources = inventory.of_kind(ArtifactKind::HookSource).peekable();
    if sources.peek().is_none() {
        render_not_found(
            md,
            "No hooks configured.",
            &["Hooks are configured in `settings.json` under the `hooks` key."],
        );
        return;
    }

    md.push_str("Hooks run commands in response to Claude Code events.\n\n");
    for record in sources {
        let ArtifactDetail::Hooks { hooks } = &record.detail else {
            continue;
        };
        md.push_str(&format!("### {} Hooks\n\n", record.scope));
        md.push_str(&format!("**Source:** {}\n\n", file_link(&record.path)));
        md.push_str("```json\n");
        md.push_str(&serde_json::to_string_pretty(hooks).unwrap_or_else(|_| hooks.to_string()));
        md.push_str("\n```\n\n");
    }
}

fn render_servers(md: &mut String, inventory: &Inventory) {
    section(md, "MCP Servers");

    let mut sources = inventory
        .of_kind(ArtifactKind::ServerRegistration)
        .peekable();
    if sources.peek().is_none() {
        render_not_found(
            md,
            "No MCP servers configured.",
            &[
                "MCP servers location:",
                "- User: `~/.claude.json` (mcpServers key)",
                "- Project: `.mcp.json`",
            ],
        );
        return;
    }

    md.push_str("MCP servers provide additional tools and data sources.\n\n");
    for record in sources {
        let ArtifactDetail::Servers { servers } = &record.detail else {
            continue;
        };
        md.push_str(&format!("### {} MCP Servers\n\n", record.scope));
        md.push_str(&format!("**Source:** {}\n\n", file_link(&record.path)));

        let Some(servers) = servers.as_object() else {
            continue;
        };
        for (name, entry) in servers {
            md.push_str(&format!("**{name}**\n"));
            for (key, label) in [("type", "Type"), ("url", "URL"), ("command", "Command")] {
                if let Some(value) = server_field(entry, key) {
                    md.push_str(&format!("- {label}: {}\n", code(&value)));
                }
            }
            md.push('\n');
        }
    }
}

/// A server entry field as display text. Missing, null, false and empty
/// string values are skipped.
fn server_field(entry: &Value, key: &str) -> Option<String> {
    match entry.as_object()?.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn render_agents(md: &mut String, inventory: &Inventory) {
    section(md, "Custom Agents");

    let mut agents = inventory.of_kind(ArtifactKind::Agent).peekable();
    if agents.peek().is_none() {
        render_not_found(
            md,
            "No custom agents found.",
            &[
                "Agents location:",
                "- User: `~/.claude/agents/*.md`",
                "- Project: `.claude/agents/*.md`",
            ],
        );
        return;
    }

    md.push_str("Custom agents are specialized AI assistants for specific tasks.\n\n");
    for record in agents {
        render_named_heading(md, record, None);
        render_header_field(md, record, "tools", "Tools");
        render_header_field(md, record, "model", "Model");
        render_preview(md, record, "System prompt preview");
        md.push('\n');
    }
}

fn render_commands(md: &mut String, inventory: &Inventory) {
    section(md, "Custom Commands");

    let mut commands = inventory.of_kind(ArtifactKind::Command).peekable();
    if commands.peek().is_none() {
        render_not_found(
            md,
            "No custom commands found.",
            &[
                "Commands location:",
                "- User: `~/.claude/commands/*.md`",
                "- Project: `.claude/commands/*.md`",
            ],
        );
        return;
    }

    md.push_str("Custom slash commands for frequently used prompts.\n\n");
    for record in commands {
        render_named_heading(md, record, record.namespace());
        render_header_field(md, record, "allowed-tools", "Allowed tools");
        render_header_field(md, record, "model", "Model");
        render_header_field(md, record, "argument-hint", "Arguments");
        render_preview(md, record, "Command preview");
        md.push('\n');
    }
}

fn render_resources(md: &mut String) {
    section(md, "Additional Resources");
    md.push_str("- Use `/memory` to edit memory files interactively\n");
    md.push_str("- Use `/context` to see token usage breakdown\n");
    md.push_str("- Use `/mcp` to manage MCP servers\n");
    md.push_str("- Use `/agents` to manage custom agents\n");
    md.push_str("- Use `/hooks` to manage hooks\n");
}
