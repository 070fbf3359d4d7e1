//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads and normalizes the dataset
//! - resolves the month selection
//! - prints reports/charts
//! - writes optional exports

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{ChartArgs, Command, DataArgs, ExportArgs, MonthArgs, SummaryArgs};
use crate::error::AppError;

pub mod pipeline;

use pipeline::{Dataset, MonthReport, load_dataset};

/// Entry point for the `leads` binary.
pub fn run() -> Result<(), AppError> {
    // `leads` and `leads -m 2024-03` behave like `leads summary ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.verbose);

    match cli.command {
        Command::Months(args) => handle_months(args),
        Command::Summary(args) => handle_summary(args),
        Command::Chart(args) => handle_chart(args),
        Command::Export(args) => handle_export(args),
        Command::Overview(args) => handle_overview(args),
    }
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load(args: &DataArgs) -> Result<Dataset, AppError> {
    let path = args.resolve_path()?;
    info!(path = %path.display(), "loading dataset");
    let dataset = load_dataset(&path)?;
    if !dataset.row_errors.is_empty() {
        warn!(count = dataset.row_errors.len(), "some CSV rows could not be read and were skipped");
    }
    Ok(dataset)
}

fn handle_months(args: DataArgs) -> Result<(), AppError> {
    let dataset = load(&args)?;
    print!("{}", crate::report::format_months(&dataset));
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let dataset = load(&args.data)?;
    let report = month_report(&dataset, &args.month)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::new(2, format!("Failed to serialize report: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    print!("{}", crate::report::format_summary(&report));
    println!();
    print!("{}", crate::report::format_daily_table(&report.daily));

    if args.table {
        println!();
        print!("{}", crate::report::format_filtered_table(&report, args.col_width));
    }
    Ok(())
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    let dataset = load(&args.data)?;
    let report = month_report(&dataset, &args.month)?;
    println!("Month: {}", report.month);
    print!("{}", crate::plot::render_daily_bars(&report.daily, args.metric, args.width));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let dataset = load(&args.data)?;
    let report = month_report(&dataset, &args.month)?;

    crate::io::export::write_daily_csv(&args.out, &report.daily)?;
    info!(path = %args.out.display(), days = report.daily.len(), "wrote daily totals");

    if let Some(path) = &args.summary_json {
        crate::io::export::write_summary_json(path, &report)?;
        info!(path = %path.display(), "wrote summary");
    }
    Ok(())
}

fn handle_overview(args: DataArgs) -> Result<(), AppError> {
    let dataset = load(&args)?;
    let reports = dataset.all_month_reports();
    print!("{}", crate::report::format_overview(&reports));
    Ok(())
}

/// Resolve the month selection and run the month pipeline.
///
/// A `--month` that is not in the data is not an error: the report is empty.
fn month_report(dataset: &Dataset, args: &MonthArgs) -> Result<MonthReport, AppError> {
    let selected = if args.pick {
        crate::cli::picker::prompt_for_month(dataset.months())?.to_string()
    } else if let Some(month) = &args.month {
        month.trim().to_string()
    } else {
        dataset
            .default_month()
            .map(|m| m.to_string())
            .ok_or_else(|| AppError::new(3, "No rows with a valid DATA value; no month to report."))?
    };

    let report = dataset.month_report(&selected);
    if report.filtered.is_empty() {
        let available: Vec<String> = dataset.months().iter().map(ToString::to_string).collect();
        warn!(month = %selected, available = %available.join(", "), "selected month has no records");
    }
    Ok(report)
}

/// Rewrite argv so `leads` defaults to `leads summary`.
///
/// Rules:
/// - `leads`                      -> `leads summary`
/// - `leads -m 2024-03 ...`       -> `leads summary -m 2024-03 ...`
/// - `leads --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("summary".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "months" | "summary" | "chart" | "export" | "overview"
    );
    if is_subcommand {
        return argv;
    }

    // A leading flag is treated as a `summary` flag.
    if arg1.starts_with('-') {
        argv.insert(1, "summary".to_string());
        return argv;
    }

    argv
}
