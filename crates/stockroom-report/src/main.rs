//! # Stockroom Report CLI
//!
//! Prints the accounting report for an exported snapshot.
//!
//! ## Usage
//! ```bash
//! # Whole history, text tables
//! stockroom-report backup.json
//!
//! # One month as JSON, with the sales history appended
//! stockroom-report backup.json --from 2024-05-01 --to 2024-05-31 --format json --history sale
//!
//! # Write the effective config to the default location
//! stockroom-report --init-config
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};

use stockroom_report::{
    init_tracing, parse_history, render_text, AccountingReport, OutputFormat, ReportConfig,
    ReportError, ReportOptions, ReportResult, Snapshot,
};

#[derive(Parser, Debug)]
#[command(name = "stockroom-report")]
#[command(about = "Accounting report over an exported Stockroom snapshot")]
struct Cli {
    /// Snapshot JSON exported from the admin panel.
    #[arg(required_unless_present = "init_config")]
    snapshot: Option<PathBuf>,

    /// Config file (also read from `STOCKROOM_CONFIG`).
    #[arg(long, env = "STOCKROOM_CONFIG")]
    config: Option<PathBuf>,

    /// Output format; overrides the config file.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// First day to include (YYYY-MM-DD, inclusive).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, inclusive).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Number of products in the top-by-revenue section.
    #[arg(long)]
    top: Option<usize>,

    /// Append the transaction history: `all`, `purchase` or `sale`.
    #[arg(long)]
    history: Option<String>,

    /// Save the effective config and exit.
    #[arg(long)]
    init_config: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Report failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ReportResult<()> {
    let mut config = ReportConfig::load(cli.config.clone())?;

    if let Some(format) = cli.format {
        config.display.format = format;
    }
    if let Some(top) = cli.top {
        config.report.top_products = top;
        config.validate()?;
    }

    if cli.init_config {
        return config.save(cli.config);
    }

    let path = cli
        .snapshot
        .ok_or_else(|| ReportError::InvalidConfig("no snapshot file given".into()))?;
    let snapshot = Snapshot::load(&path)?;
    config.adopt_snapshot_currency(snapshot.currency());

    let issues = snapshot.audit();
    if !issues.is_empty() {
        info!(count = issues.len(), "Snapshot has rows that fail validation");
    }

    let mut options = ReportOptions::from_config(&config).with_range(cli.from, cli.to)?;
    if let Some(selector) = cli.history.as_deref() {
        options.history = Some(parse_history(selector)?);
    }

    let report = AccountingReport::build(&snapshot, &config, &options);

    match config.display.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
