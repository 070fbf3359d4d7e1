//! Month filtering and aggregation.
//!
//! - month choices + selection (`filter`)
//! - per-date and grand totals (`totals`)
//! - channel shares (`share`)

pub mod filter;
pub mod share;
pub mod totals;

pub use filter::{available_months, filter_by_month};
pub use share::{compute_shares, round2};
pub use totals::{daily_totals, summary_totals};
