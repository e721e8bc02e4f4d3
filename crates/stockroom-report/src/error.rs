//! # Report Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io / serde_json / toml errors                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  main() prints the message and exits non-zero                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use stockroom_core::CoreError;
use thiserror::Error;

/// Errors raised by the reporting view.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed.
    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Config could not be serialized.
    #[error("Config serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot file parsed as JSON but is not a usable export.
    ///
    /// ## When This Occurs
    /// - `products` key missing or not a list (same guard as the import screen)
    #[error("Invalid snapshot {path}: {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },

    /// `--from` is after `--to`.
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// Domain value failed to parse.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ReportError {
    pub fn invalid_snapshot(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ReportError::InvalidSnapshot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for reporting operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReportError::invalid_snapshot("backup.json", "missing products");
        assert_eq!(err.to_string(), "Invalid snapshot backup.json: missing products");

        let err: ReportError = CoreError::UnknownTransactionKind("refund".into()).into();
        assert_eq!(
            err.to_string(),
            "Unknown transaction type: 'refund' (expected purchase or sale)"
        );
    }
}
