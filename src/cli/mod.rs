//! Command-line parsing for the channel lead report.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Metric;
use crate::error::AppError;

pub mod picker;

/// Environment variable consulted when `--csv` is not given.
pub const CSV_ENV_VAR: &str = "LEADS_CSV";

/// Dataset used when neither `--csv` nor `LEADS_CSV` is set.
pub const DEFAULT_CSV: &str = "dados1.csv";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "leads", version, about = "Monthly WhatsApp/Instagram lead and appointment report")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the months present in the dataset.
    Months(DataArgs),
    /// Print scorecards, channel shares and per-day totals for one month.
    Summary(SummaryArgs),
    /// Draw a per-day bar chart of one metric.
    Chart(ChartArgs),
    /// Write per-day totals (CSV) and optionally the summary (JSON).
    Export(ExportArgs),
    /// Totals and shares for every month.
    Overview(DataArgs),
}

/// Where to read the dataset from.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Input CSV. Falls back to `LEADS_CSV` (a `.env` file is honored), then `dados1.csv`.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub csv: Option<PathBuf>,
}

impl DataArgs {
    /// Resolve the dataset path: flag, then environment, then the default.
    pub fn resolve_path(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.csv {
            return picker::validate_csv_path(path);
        }

        dotenvy::dotenv().ok();
        let path = std::env::var(CSV_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV));
        picker::validate_csv_path(&path)
    }
}

/// How the month is chosen.
#[derive(Debug, Args, Clone)]
pub struct MonthArgs {
    /// Month to report (`YYYY-MM`). Defaults to the first month in the data.
    #[arg(short, long, value_name = "YYYY-MM")]
    pub month: Option<String>,

    /// Choose the month from an interactive list.
    #[arg(long, conflicts_with = "month")]
    pub pick: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub month: MonthArgs,

    /// Also print the filtered rows.
    #[arg(long)]
    pub table: bool,

    /// Column width for `--table`.
    #[arg(long, default_value_t = 14)]
    pub col_width: usize,

    /// Print the full month report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub month: MonthArgs,

    /// Metric to chart.
    #[arg(long, value_enum, default_value_t = Metric::LeadsWhatsapp)]
    pub metric: Metric,

    /// Bar width (columns).
    #[arg(long, default_value_t = 50)]
    pub width: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub month: MonthArgs,

    /// Per-day totals CSV to write.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// Also write the month summary as JSON.
    #[arg(long = "summary-json", value_name = "JSON")]
    pub summary_json: Option<PathBuf>,
}
