//! Shared pipeline logic used by every CLI command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV -> schema -> parsed records -> month filter -> daily/summary totals
//!
//! A `Dataset` is built once per load and never mutated afterwards; each month
//! selection produces a fresh `MonthReport`, so reports for different months
//! can be computed in parallel.

use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{available_months, daily_totals, filter_by_month, summary_totals};
use crate::domain::{DailyTotal, MonthKey, ParsedRecord, SummaryTotals};
use crate::error::IngestError;
use crate::io::ingest::{RawTable, RowError, load_csv};
use crate::normalize::{Schema, parse_record, sort_chronologically};

/// A loaded, normalized dataset: fixed schema plus every parsed row.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub schema: Schema,
    /// All rows, chronologically sorted with undated rows last.
    pub records: Vec<ParsedRecord>,
    pub row_errors: Vec<RowError>,
    months: Vec<MonthKey>,
}

/// All computed outputs for one month selection.
#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub month: String,
    pub columns: Vec<String>,
    pub filtered: Vec<ParsedRecord>,
    pub daily: Vec<DailyTotal>,
    pub summary: SummaryTotals,
}

/// Read a CSV file and normalize it.
pub fn load_dataset(path: &Path) -> Result<Dataset, IngestError> {
    let table = load_csv(path)?;
    Ok(Dataset::from_table(table))
}

impl Dataset {
    pub fn from_table(table: RawTable) -> Self {
        let schema = Schema::from_headers(&table.headers);

        let mut records: Vec<ParsedRecord> = table
            .rows
            .iter()
            .map(|row| parse_record(&schema, row.line, &row.fields))
            .collect();
        sort_chronologically(&mut records);

        let months = available_months(&records);
        let undated = records.iter().filter(|r| r.date.is_none()).count();
        if undated > 0 {
            warn!(undated, "rows with an unparsable date are excluded from monthly results");
        }
        info!(
            rows = records.len(),
            columns = schema.columns().len(),
            months = months.len(),
            "dataset normalized"
        );

        Self {
            schema,
            records,
            row_errors: table.row_errors,
            months,
        }
    }

    /// Valid month selections, in chronological order.
    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    /// The month used when the caller does not pick one: the first available.
    pub fn default_month(&self) -> Option<MonthKey> {
        self.months.first().copied()
    }

    pub fn undated_count(&self) -> usize {
        self.records.iter().filter(|r| r.date.is_none()).count()
    }

    /// Number of records in a given month.
    pub fn month_size(&self, month: MonthKey) -> usize {
        self.records
            .iter()
            .filter(|r| r.month_key == Some(month))
            .count()
    }

    /// Filter to `selected` and aggregate.
    ///
    /// A selection that is not one of `months()` gives an empty report with
    /// zeroed totals.
    pub fn month_report(&self, selected: &str) -> MonthReport {
        let filtered = filter_by_month(&self.records, selected);
        if filtered.is_empty() {
            debug!(month = selected, "no records for selection");
        }

        let daily = daily_totals(&filtered);
        let summary = summary_totals(&filtered);

        MonthReport {
            month: selected.to_string(),
            columns: self.schema.columns().to_vec(),
            filtered: filtered.into_iter().cloned().collect(),
            daily,
            summary,
        }
    }

    /// One report per available month, computed in parallel.
    pub fn all_month_reports(&self) -> Vec<MonthReport> {
        self.months
            .par_iter()
            .map(|month| self.month_report(&month.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_table;

    const CSV: &str = "\
\" DATA \",LEADS NOVOS WHATSAPP,\"TOTAL DE LEADS\nÚTEIS INSTAGRAM\",AGENDAMENTOS FEITOS NO DIA WHATSAPP,AGENDAMENTOS INSTAGRAM,LEADS NOVOS WHATSAPP
02/04/2024,4,6,1,1,999
05/03/2024,3,2,1,0,999
sem data,100,100,100,100,999
05/03/2024,5,abc,0,2,999
10/03/2024,,8,2,1,999
";

    fn dataset() -> Dataset {
        Dataset::from_table(read_table(CSV.as_bytes()).unwrap())
    }

    #[test]
    fn months_are_chronological() {
        let ds = dataset();
        let months: Vec<String> = ds.months().iter().map(ToString::to_string).collect();
        assert_eq!(months, vec!["2024-03", "2024-04"]);
        assert_eq!(ds.default_month().map(|m| m.to_string()).as_deref(), Some("2024-03"));
        assert_eq!(ds.undated_count(), 1);
    }

    #[test]
    fn month_report_aggregates_selection() {
        let report = dataset().month_report("2024-03");
        assert_eq!(report.filtered.len(), 3);
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].totals.leads_whatsapp, 8.0);
        assert_eq!(report.daily[0].totals.leads_instagram_total, 2.0);
        assert_eq!(report.summary.totals.leads_whatsapp, 8.0);
        assert_eq!(report.summary.totals.leads_instagram_total, 10.0);
        assert_eq!(report.summary.totals.appointments_whatsapp, 3.0);
        assert_eq!(report.summary.totals.appointments_instagram, 3.0);
        assert_eq!(report.summary.whatsapp_share, 44.44);
        assert_eq!(report.summary.instagram_share, 55.56);
        // duplicate column dropped: first-seen WhatsApp values are used
        assert_eq!(report.columns.len(), 5);
    }

    #[test]
    fn unknown_month_is_empty_not_error() {
        let report = dataset().month_report("2030-01");
        assert!(report.filtered.is_empty());
        assert!(report.daily.is_empty());
        assert_eq!(report.summary, SummaryTotals::default());
    }

    #[test]
    fn padded_selection_is_not_a_month() {
        let report = dataset().month_report(" 2024-03");
        assert!(report.filtered.is_empty());
        assert_eq!(report.summary, SummaryTotals::default());
    }

    #[test]
    fn reruns_are_identical() {
        let ds = dataset();
        let a = ds.month_report("2024-03");
        let b = ds.month_report("2024-03");
        assert_eq!(a.filtered, b.filtered);
        assert_eq!(a.daily, b.daily);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn parallel_reports_match_sequential() {
        let ds = dataset();
        let all = ds.all_month_reports();
        assert_eq!(all.len(), 2);
        for report in &all {
            let single = ds.month_report(&report.month);
            assert_eq!(report.summary, single.summary);
        }
        assert_eq!(all[1].month, "2024-04");
    }
}
