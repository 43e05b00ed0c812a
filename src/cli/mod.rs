//! CLI commands for Census.

pub mod report;

pub use report::{ReportCommand, ReportOptions, ReportOutput};
