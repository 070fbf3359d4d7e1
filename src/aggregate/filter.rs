//! Month selection.

use std::collections::HashSet;

use crate::domain::{MonthKey, ParsedRecord};

/// Distinct month keys in first-seen order (undated records are skipped).
///
/// For chronologically sorted records this is also ascending order.
pub fn available_months(records: &[ParsedRecord]) -> Vec<MonthKey> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.month_key)
        .filter(|key| seen.insert(*key))
        .collect()
}

/// Records whose month key equals `selected`, in their original order.
///
/// An unknown or malformed selection is a valid "no data" answer: the result
/// is simply empty.
pub fn filter_by_month<'a>(records: &'a [ParsedRecord], selected: &str) -> Vec<&'a ParsedRecord> {
    let Some(selected) = MonthKey::parse(selected) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| r.month_key == Some(selected))
        .collect()
}
