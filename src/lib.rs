//! `lead-metrics` library crate.
//!
//! Turns a daily WhatsApp/Instagram lead sheet into monthly summaries:
//! header cleanup, day-first dates, `YYYY-MM` buckets, numeric coercion,
//! per-day and per-month totals, and the lead share per channel.
//!
//! The binary (`leads`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - each pipeline stage can be exercised in isolation

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod normalize;
pub mod plot;
pub mod report;

pub use app::pipeline::{Dataset, MonthReport, load_dataset};
pub use error::{AppError, IngestError};
