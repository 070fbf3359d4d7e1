//! Per-date and grand totals over a filtered set.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DailyTotal, MetricValues, ParsedRecord, SummaryTotals};

use super::share::compute_shares;

/// Group by exact date and sum each metric, ascending by date.
///
/// Undated records cannot be keyed and are skipped. A month-filtered set never
/// contains any.
pub fn daily_totals(records: &[&ParsedRecord]) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, MetricValues> = BTreeMap::new();
    for r in records {
        let Some(date) = r.date else { continue };
        *by_date.entry(date).or_default() += r.metrics;
    }
    by_date
        .into_iter()
        .map(|(date, totals)| DailyTotal { date, totals })
        .collect()
}

/// Sum each metric across the set and derive the channel lead shares.
pub fn summary_totals(records: &[&ParsedRecord]) -> SummaryTotals {
    let mut totals = MetricValues::default();
    for r in records {
        totals += r.metrics;
    }
    let shares = compute_shares(totals.leads_whatsapp, totals.leads_instagram_total);

    SummaryTotals {
        record_count: records.len(),
        totals,
        whatsapp_share: shares.whatsapp,
        instagram_share: shares.instagram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Metric;
    use crate::normalize::{Schema, parse_record};

    fn schema() -> Schema {
        Schema::from_headers([
            "DATA",
            "LEADS NOVOS WHATSAPP",
            "TOTAL DE LEADS ÚTEIS INSTAGRAM",
            "AGENDAMENTOS FEITOS NO DIA WHATSAPP",
            "AGENDAMENTOS INSTAGRAM",
        ])
    }

    #[test]
    fn same_date_records_are_summed() {
        let s = schema();
        let recs = vec![
            parse_record(&s, 2, ["05/03/2024", "3", "1", "0", "0"]),
            parse_record(&s, 3, ["05/03/2024", "5", "2", "1", "0"]),
        ];
        let refs: Vec<&ParsedRecord> = recs.iter().collect();
        let daily = daily_totals(&refs);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(daily[0].totals.leads_whatsapp, 8.0);
        assert_eq!(daily[0].totals.leads_instagram_total, 3.0);
    }

    #[test]
    fn daily_totals_are_ascending_and_sum_to_summary() {
        let s = schema();
        let recs = vec![
            parse_record(&s, 2, ["07/03/2024", "1.5", "4", "1", "2"]),
            parse_record(&s, 3, ["02/03/2024", "2", "abc", "0", "1"]),
            parse_record(&s, 4, ["07/03/2024", "0.25", "6", "3", ""]),
            parse_record(&s, 5, ["04/03/2024", "10", "1", "2", "2"]),
        ];
        let refs: Vec<&ParsedRecord> = recs.iter().collect();
        let daily = daily_totals(&refs);
        let dates: Vec<String> = daily.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-02", "2024-03-04", "2024-03-07"]);

        let summary = summary_totals(&refs);
        assert_eq!(summary.record_count, 4);
        for metric in Metric::ALL {
            let from_daily: f64 = daily.iter().map(|d| d.totals.get(metric)).sum();
            assert!((from_daily - summary.totals.get(metric)).abs() < 1e-9, "{metric:?}");
        }
    }

    #[test]
    fn empty_set_yields_zeroes() {
        let daily = daily_totals(&[]);
        assert!(daily.is_empty());

        let summary = summary_totals(&[]);
        assert_eq!(summary, SummaryTotals::default());
    }

    #[test]
    fn summary_carries_shares() {
        let s = schema();
        let recs = vec![
            parse_record(&s, 2, ["01/03/2024", "10", "20", "0", "0"]),
            parse_record(&s, 3, ["02/03/2024", "20", "50", "0", "0"]),
        ];
        let refs: Vec<&ParsedRecord> = recs.iter().collect();
        let summary = summary_totals(&refs);
        assert_eq!(summary.whatsapp_share, 30.0);
        assert_eq!(summary.instagram_share, 70.0);
    }
}
