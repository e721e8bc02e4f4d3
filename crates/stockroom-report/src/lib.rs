//! # Stockroom Report
//!
//! The reporting view over an exported snapshot. All arithmetic lives in
//! `stockroom-core`; this crate handles files, config, logging and output.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         stockroom-report                                │
//! │                                                                         │
//! │  report.toml + env ──► ReportConfig ─────────┐                          │
//! │                                              ▼                          │
//! │  backup.json ──► Snapshot ──► audit ──► AccountingReport::build          │
//! │                                              │                          │
//! │                                   ┌──────────┴──────────┐               │
//! │                                   ▼                     ▼               │
//! │                              render_text           serde_json           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod snapshot;

pub use config::{OutputFormat, ReportConfig};
pub use error::{ReportError, ReportResult};
pub use render::render_text;
pub use report::{parse_history, AccountingReport, ReportOptions};
pub use snapshot::{RowIssue, Snapshot};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for the report itself.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom_report=trace` - Trace for this crate only
/// - Default: WARN, INFO for the stockroom crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stockroom_report=info,stockroom_core=info"));

    // Ignore the error when a subscriber is already installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
