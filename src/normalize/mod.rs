//! Row normalization: headers -> schema, raw rows -> typed `ParsedRecord`s.
//!
//! - header sanitation and de-duplication (`columns`)
//! - day-first dates and month buckets (`dates`)
//! - metric coercion (`numeric`)

pub mod columns;
pub mod dates;
pub mod numeric;

pub use columns::{Schema, normalize_header};
pub use dates::{month_key, parse_day_first};
pub use numeric::{coerce_metrics, coerce_number};

use crate::domain::ParsedRecord;

/// Turn one raw row into a `ParsedRecord`.
///
/// Never fails: an unparsable date leaves `date`/`month_key` empty and an
/// unparsable metric is `0.0`.
pub fn parse_record<I, S>(schema: &Schema, line: usize, fields: I) -> ParsedRecord
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let values = schema.normalize_row(fields);
    let date = schema
        .date_slot()
        .and_then(|slot| values.get(slot))
        .and_then(|raw| parse_day_first(raw));
    let metrics = coerce_metrics(schema, &values);

    ParsedRecord {
        line,
        date,
        month_key: month_key(date),
        metrics,
        values,
    }
}

/// Stable chronological sort; undated records go last in their original order.
pub fn sort_chronologically(records: &mut [ParsedRecord]) {
    records.sort_by_key(|r| (r.date.is_none(), r.date));
}
