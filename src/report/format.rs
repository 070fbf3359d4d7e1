//! Formatted terminal output: scorecards, daily tables, month lists.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays free of presentation concerns
//! - output changes are localized

use crate::app::pipeline::{Dataset, MonthReport};
use crate::domain::{DailyTotal, Metric, SummaryTotals};

/// List the selectable months with their record counts.
pub fn format_months(dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>8}\n", "month", "records"));
    out.push_str(&format!("{:-<8} {:-<8}\n", "", ""));
    for month in dataset.months() {
        out.push_str(&format!("{:<8} {:>8}\n", month.to_string(), dataset.month_size(*month)));
    }
    let undated = dataset.undated_count();
    if undated > 0 {
        out.push_str(&format!("({undated} row(s) without a valid date)\n"));
    }
    for err in &dataset.row_errors {
        out.push_str(&format!("skipped line {}: {}\n", err.line, err.message));
    }
    out
}

/// Scorecards for one month: totals per metric and the lead split.
pub fn format_summary(report: &MonthReport) -> String {
    let mut out = String::new();

    out.push_str("=== leads - channel summary ===\n");
    out.push_str(&format!("Month: {}\n", report.month));
    out.push_str(&format!("Records: {}\n", report.summary.record_count));
    out.push('\n');

    for (label, value) in scorecards(&report.summary) {
        out.push_str(&format!("{label:<24} {value:>10}\n"));
    }

    out
}

/// `(label, value)` pairs in display order.
///
/// Metric totals are shown as whole numbers (truncated); shares as `NN.NN%`.
pub fn scorecards(summary: &SummaryTotals) -> Vec<(String, String)> {
    let mut cards: Vec<(String, String)> = Metric::ALL
        .iter()
        .map(|m| (m.label().to_string(), fmt_count(summary.totals.get(*m))))
        .collect();
    cards.push(("WhatsApp %".to_string(), format!("{:.2}%", summary.whatsapp_share)));
    cards.push(("Instagram %".to_string(), format!("{:.2}%", summary.instagram_share)));
    cards
}

/// Per-date totals, one row per date.
pub fn format_daily_table(daily: &[DailyTotal]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12}\n",
            "date", "leads_wa", "leads_ig", "appts_wa", "appts_ig"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "", "").trim_end());
    out.push('\n');

    if daily.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    for d in daily {
        out.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12}\n",
            d.date.format("%Y-%m-%d"),
            fmt_value(d.totals.leads_whatsapp),
            fmt_value(d.totals.leads_instagram_total),
            fmt_value(d.totals.appointments_whatsapp),
            fmt_value(d.totals.appointments_instagram),
        ));
    }
    out
}

/// The filtered rows under the normalized schema.
pub fn format_filtered_table(report: &MonthReport, col_width: usize) -> String {
    let width = col_width.max(4);
    let mut out = String::new();

    let header: Vec<String> = report
        .columns
        .iter()
        .map(|c| format!("{:<width$}", truncate(c, width)))
        .collect();
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');

    for r in &report.filtered {
        let cells: Vec<String> = r
            .values
            .iter()
            .map(|v| format!("{:<width$}", truncate(v.trim(), width)))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

/// One line per month: lead totals and shares.
pub fn format_overview(reports: &[MonthReport]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:>8} {:>10} {:>10} {:>8} {:>8}\n",
        "month", "records", "leads_wa", "leads_ig", "wa %", "ig %"
    ));
    out.push_str(&format!(
        "{:-<8} {:-<8} {:-<10} {:-<10} {:-<8} {:-<8}\n",
        "", "", "", "", "", ""
    ));
    for r in reports {
        let s = &r.summary;
        out.push_str(&format!(
            "{:<8} {:>8} {:>10} {:>10} {:>8.2} {:>8.2}\n",
            r.month,
            s.record_count,
            fmt_count(s.totals.leads_whatsapp),
            fmt_count(s.totals.leads_instagram_total),
            s.whatsapp_share,
            s.instagram_share,
        ));
    }
    out
}

fn fmt_count(v: f64) -> String {
    format!("{}", v.trunc() as i64)
}

fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 {
        fmt_count(v)
    } else {
        format!("{v:.2}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
