//! Report rendering.
//!
//! The renderer consumes an [`Inventory`] and produces one UTF-8 document.
//! Markdown is the human-facing format; JSON exposes the same records for
//! scripting.

pub mod format;
pub mod markdown;

pub use format::format_size;
pub use markdown::render_markdown;

use crate::discovery::Inventory;
use crate::error::Result;

/// Output format for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown document.
    #[default]
    Markdown,
    /// Pretty-printed JSON of the inventory.
    Json,
}

impl ReportFormat {
    /// Pick a format from the `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Markdown
        }
    }
}

/// Render an inventory in the given format.
///
/// # Errors
///
/// `Serde` if JSON serialization fails.
pub fn render(inventory: &Inventory, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Markdown => Ok(render_markdown(inventory)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(inventory)?),
    }
}
