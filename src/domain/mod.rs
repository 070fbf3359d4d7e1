//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the tracked metric set (`Metric`, `MetricValues`)
//! - month buckets (`MonthKey`)
//! - parsed rows and aggregation outputs (`ParsedRecord`, `DailyTotal`, `SummaryTotals`)

pub mod types;

pub use types::*;
