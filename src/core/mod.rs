//! Core data model for Census.
//!
//! This module contains:
//! - Scope levels and their precedence
//! - Artifact records and per-kind counts
//! - Header block extraction
//! - Bounded body previews

pub mod artifact;
pub mod header;
pub mod preview;
pub mod scope;

pub use artifact::{ArtifactDetail, ArtifactKind, ArtifactRecord, FileStats, KindCounts};
pub use header::{extract_header, Extracted, Header, HEADER_DELIMITER};
pub use preview::{preview, preview_non_empty};
pub use scope::ScopeLevel;
