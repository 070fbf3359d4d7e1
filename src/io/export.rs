//! Export month results to CSV/JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::MonthReport;
use crate::domain::{DailyTotal, Metric, SummaryTotals};
use crate::error::AppError;

/// Write per-date totals to a CSV file (`date` + one column per metric key).
pub fn write_daily_csv(path: &Path, daily: &[DailyTotal]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header = vec!["date"];
    header.extend(Metric::ALL.iter().map(|m| m.key()));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for d in daily {
        let mut row = vec![d.date.format("%Y-%m-%d").to_string()];
        row.extend(Metric::ALL.iter().map(|m| d.totals.get(*m).to_string()));
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    tool: &'static str,
    month: &'a str,
    summary: &'a SummaryTotals,
}

/// Write the month's summary totals and shares as pretty JSON.
pub fn write_summary_json(path: &Path, report: &MonthReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    let body = SummaryFile {
        tool: "leads",
        month: &report.month,
        summary: &report.summary,
    };

    serde_json::to_writer_pretty(file, &body)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetricValues;
    use chrono::NaiveDate;

    #[test]
    fn daily_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily.csv");
        let daily = vec![DailyTotal {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            totals: MetricValues {
                leads_whatsapp: 8.0,
                leads_instagram_total: 2.5,
                appointments_whatsapp: 1.0,
                appointments_instagram: 0.0,
            },
        }];
        write_daily_csv(&path, &daily).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("date,leads_whatsapp,leads_instagram_total,appointments_whatsapp,appointments_instagram")
        );
        assert_eq!(lines.next(), Some("2024-03-05,8,2.5,1,0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn summary_json_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let report = MonthReport {
            month: "2024-03".to_string(),
            columns: vec!["DATA".to_string()],
            filtered: Vec::new(),
            daily: Vec::new(),
            summary: SummaryTotals {
                record_count: 2,
                totals: MetricValues {
                    leads_whatsapp: 30.0,
                    leads_instagram_total: 70.0,
                    ..MetricValues::default()
                },
                whatsapp_share: 30.0,
                instagram_share: 70.0,
            },
        };
        write_summary_json(&path, &report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["month"], "2024-03");
        assert_eq!(value["summary"]["record_count"], 2);
        assert_eq!(value["summary"]["totals"]["leads_instagram_total"], 70.0);
        assert_eq!(value["summary"]["whatsapp_share"], 30.0);
    }
}
