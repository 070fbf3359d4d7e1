//! Numeric coercion for the tracked metrics.

use crate::domain::{Metric, MetricValues};
use crate::normalize::Schema;

/// Coerce a raw cell to `f64`.
///
/// Empty, non-numeric and non-finite values (`nan`, `inf`) become `0.0`.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Coerce every tracked metric of a normalized row.
///
/// A metric whose column is missing from the schema is `0.0` on every row.
pub fn coerce_metrics(schema: &Schema, values: &[String]) -> MetricValues {
    MetricValues::from_fn(|metric: Metric| {
        let raw = schema
            .metric_slot(metric)
            .and_then(|slot| values.get(slot))
            .map(String::as_str);
        coerce_number(raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_or_defaults_to_zero() {
        assert_eq!(coerce_number(Some("12")), 12.0);
        assert_eq!(coerce_number(Some(" 3.5 ")), 3.5);
        assert_eq!(coerce_number(Some("-2")), -2.0);
        assert_eq!(coerce_number(Some("abc")), 0.0);
        assert_eq!(coerce_number(Some("")), 0.0);
        assert_eq!(coerce_number(Some("NaN")), 0.0);
        assert_eq!(coerce_number(Some("inf")), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }

    #[test]
    fn missing_metric_column_is_zero() {
        let schema = Schema::from_headers(["DATA", "LEADS NOVOS WHATSAPP", "OBS"]);
        let row = schema.normalize_row(["05/03/2024", "7", "12"]);
        let metrics = coerce_metrics(&schema, &row);
        assert_eq!(metrics.leads_whatsapp, 7.0);
        assert_eq!(metrics.leads_instagram_total, 0.0);
        assert_eq!(metrics.appointments_whatsapp, 0.0);
        assert_eq!(metrics.appointments_instagram, 0.0);
    }
}
