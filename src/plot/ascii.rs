//! ASCII bar charts for terminal output.
//!
//! This is intentionally "dumb" (one bar per date, fixed width), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output

use crate::domain::{DailyTotal, Metric};

const BAR: char = '#';

/// Render one horizontal bar per date for `metric`.
///
/// Bars are scaled so the largest value fills `width` columns. Negative
/// values (rare, but coercion allows them) draw no bar.
pub fn render_daily_bars(daily: &[DailyTotal], metric: Metric, width: usize) -> String {
    let width = width.max(10);
    let mut out = String::new();
    out.push_str(&format!("{} per day\n", metric.label()));

    if daily.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let max = daily
        .iter()
        .map(|d| d.totals.get(metric))
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    for d in daily {
        let value = d.totals.get(metric);
        let len = bar_len(value, max, width);
        out.push_str(&format!(
            "{} | {:<width$} {}\n",
            d.date.format("%Y-%m-%d"),
            BAR.to_string().repeat(len),
            fmt_value(value),
        ));
    }
    out
}

fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if !(value.is_finite() && max > 0.0 && value > 0.0) {
        return 0;
    }
    let len = (value / max * width as f64).round() as usize;
    // Keep tiny but non-zero values visible.
    len.clamp(1, width)
}

fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v:.2}")
    }
}
