//! Report command for Census.
//!
//! Runs discovery for a project directory and either prints the report or
//! writes it to a file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::core::KindCounts;
use crate::discovery::Inventory;
use crate::error::{CensusError, Result};
use crate::report::{render, ReportFormat};

/// Options for the report command.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Render the inventory as JSON instead of markdown.
    pub json: bool,
    /// Suppress status messages. The report itself is still printed.
    pub quiet: bool,
    /// Write the report here instead of stdout.
    pub output: Option<PathBuf>,
}

/// Result of the report command.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    /// Whether a report was produced.
    pub success: bool,
    /// Per-kind totals.
    pub counts: KindCounts,
    /// File the report was written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<PathBuf>,
    /// Rendered report, when it goes to stdout.
    #[serde(skip)]
    pub document: Option<String>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportOutput {
    /// A report rendered for stdout.
    pub fn printed(counts: KindCounts, document: String) -> Self {
        Self {
            success: true,
            counts,
            written_to: None,
            document: Some(document),
            error: None,
        }
    }

    /// A report written to `path`.
    pub fn written(counts: KindCounts, path: PathBuf) -> Self {
        Self {
            success: true,
            counts,
            written_to: Some(path),
            document: None,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            counts: KindCounts::default(),
            written_to: None,
            document: None,
            error: Some(error.into()),
        }
    }
}

/// The report command implementation.
pub struct ReportCommand {
    project_dir: PathBuf,
    config: Config,
}

impl ReportCommand {
    /// Create a new report command.
    pub fn new(project_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            project_dir: project_dir.into(),
            config,
        }
    }

    /// Run the report command.
    pub fn run(&self, options: &ReportOptions) -> ReportOutput {
        match self.execute(options) {
            Ok(output) => output,
            Err(e) => {
                if e.is_recoverable() {
                    tracing::warn!("report: {}", e);
                } else {
                    tracing::error!("report: {}", e);
                }
                ReportOutput::failure(e.to_string())
            }
        }
    }

    fn execute(&self, options: &ReportOptions) -> Result<ReportOutput> {
        let inventory = Inventory::collect(&self.config, &self.project_dir);
        let document = render(&inventory, ReportFormat::from_json_flag(options.json))?;

        match &options.output {
            Some(path) => {
                write_report(path, &document)?;
                tracing::debug!(path = %path.display(), bytes = document.len(), "report written");
                Ok(ReportOutput::written(inventory.counts, path.clone()))
            }
            None => Ok(ReportOutput::printed(inventory.counts, document)),
        }
    }

    /// Text for stdout.
    ///
    /// Failures produce nothing here; the caller reports them on stderr.
    pub fn format_output(&self, output: &ReportOutput, options: &ReportOptions) -> String {
        if !output.success {
            return String::new();
        }
        if let Some(document) = &output.document {
            return document.clone();
        }
        match &output.written_to {
            Some(path) if !options.quiet => format!("Report written to: {}", path.display()),
            _ => String::new(),
        }
    }
}

/// Write the rendered report.
///
/// # Errors
///
/// `Output` if the file cannot be written.
pub fn write_report(path: &Path, document: &str) -> Result<()> {
    fs::write(path, document).map_err(|e| CensusError::output(path, e))
}
