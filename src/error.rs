//! Error types for Census with a best-effort discovery policy.
//!
//! Discovery never fails as a whole. Missing files, unreadable files and
//! malformed documents are recovered where they occur: the probe logs the
//! problem and records an absent or degraded value, then keeps scanning.
//! The only error allowed to end a run abnormally is failing to write the
//! final report.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Census operations.
#[derive(Error, Debug)]
pub enum CensusError {
    /// A file or directory that was probed does not exist.
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    /// I/O failure while reading an artifact.
    #[error("unreadable file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A structured document (JSON settings) failed to decode.
    #[error("malformed document {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    /// A header block was opened but could not be parsed.
    #[error("malformed header: {message}")]
    MalformedHeader { message: String },

    /// Enterprise locations are unknown for this platform.
    #[error("unsupported platform: {platform}")]
    UnsupportedPlatform { platform: String },

    /// The final report could not be written.
    #[error("failed to write report to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },
}

/// A specialized Result type for Census operations.
pub type Result<T> = std::result::Result<T, CensusError>;

impl CensusError {
    /// Create a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an unreadable-file error from an I/O error.
    ///
    /// `NotFound` I/O errors are mapped to [`CensusError::NotFound`] so that
    /// races between an existence check and the read still count as absence.
    pub fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Unreadable { path, source }
    }

    /// Create a malformed-document error.
    pub fn malformed_document(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create an unsupported-platform error.
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Create an output error.
    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the run can continue after this error.
    ///
    /// Discovery errors are recovered in place. Failing to produce or write
    /// the report is not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Output { .. } | Self::Serde { .. })
    }
}

impl From<serde_json::Error> for CensusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Outcome of a best-effort probe.
///
/// Distinguishes "nothing there" from "something there but unusable" so
/// callers can leave fields empty without losing the reason.
#[derive(Debug)]
pub enum Probed<T> {
    /// The value was read and decoded.
    Found(T),
    /// The source does not exist. Expected, not an error.
    Absent,
    /// The source exists but could not be read or decoded.
    Degraded(CensusError),
}

impl<T> Probed<T> {
    /// Fold a result into a probe outcome. `NotFound` becomes `Absent`.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Found(value),
            Err(CensusError::NotFound { .. }) => Self::Absent,
            Err(err) => Self::Degraded(err),
        }
    }

    /// Borrow the value if found.
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the value was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Whether the source existed but could not be used.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// Discard the reason and keep only the value.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Map the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Probed<U> {
        match self {
            Self::Found(value) => Probed::Found(f(value)),
            Self::Absent => Probed::Absent,
            Self::Degraded(err) => Probed::Degraded(err),
        }
    }

    /// Chain another fallible step onto a found value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Probed<U>) -> Probed<U> {
        match self {
            Self::Found(value) => f(value),
            Self::Absent => Probed::Absent,
            Self::Degraded(err) => Probed::Degraded(err),
        }
    }

    /// Log a degraded outcome as a warning. Returns self for chaining.
    pub fn log_degraded(self, context: &str) -> Self {
        if let Self::Degraded(err) = &self {
            tracing::warn!("{}: {} (continuing without it)", context, err);
        }
        self
    }
}

/// Fail-open handling for results.
///
/// Logs the error and substitutes a value instead of propagating.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Exit codes for the Census CLI.
pub mod exit_codes {
    /// The report was produced.
    pub const SUCCESS: i32 = 0;

    /// The report could not be written.
    pub const ERROR: i32 = 1;
}
