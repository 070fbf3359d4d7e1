//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages without string-keyed lookups
//! - rendered by the terminal report
//! - exported to JSON/CSV

use std::fmt;
use std::ops::AddAssign;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Serialize, Serializer};

/// Canonical name of the date column after header normalization.
pub const DATE_COLUMN: &str = "DATA";

/// One of the four tracked numeric fields.
///
/// Every tracked metric is coerced to `f64` and aggregated; all other columns
/// pass through as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    LeadsWhatsapp,
    LeadsInstagramTotal,
    AppointmentsWhatsapp,
    AppointmentsInstagram,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::LeadsWhatsapp,
        Metric::LeadsInstagramTotal,
        Metric::AppointmentsWhatsapp,
        Metric::AppointmentsInstagram,
    ];

    /// Stable snake_case key used in exports.
    pub fn key(self) -> &'static str {
        match self {
            Metric::LeadsWhatsapp => "leads_whatsapp",
            Metric::LeadsInstagramTotal => "leads_instagram_total",
            Metric::AppointmentsWhatsapp => "appointments_whatsapp",
            Metric::AppointmentsInstagram => "appointments_instagram",
        }
    }

    /// Normalized header the metric is read from.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::LeadsWhatsapp => "LEADS NOVOS WHATSAPP",
            Metric::LeadsInstagramTotal => "TOTAL DE LEADS ÚTEIS INSTAGRAM",
            Metric::AppointmentsWhatsapp => "AGENDAMENTOS FEITOS NO DIA WHATSAPP",
            Metric::AppointmentsInstagram => "AGENDAMENTOS INSTAGRAM",
        }
    }

    /// Alternative headers accepted when `column_name` is absent.
    ///
    /// Some exports label the Instagram lead count `LEADS ÚTEIS INSTAGRAM`
    /// instead of `TOTAL DE LEADS ÚTEIS INSTAGRAM`.
    pub fn column_aliases(self) -> &'static [&'static str] {
        match self {
            Metric::LeadsInstagramTotal => &["LEADS ÚTEIS INSTAGRAM"],
            _ => &[],
        }
    }

    /// Scorecard label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::LeadsWhatsapp => "Total Leads WhatsApp",
            Metric::LeadsInstagramTotal => "Total Leads Instagram",
            Metric::AppointmentsWhatsapp => "Agendamentos WhatsApp",
            Metric::AppointmentsInstagram => "Agendamentos Instagram",
        }
    }
}

/// One value per tracked metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricValues {
    pub leads_whatsapp: f64,
    pub leads_instagram_total: f64,
    pub appointments_whatsapp: f64,
    pub appointments_instagram: f64,
}

impl MetricValues {
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        Self {
            leads_whatsapp: f(Metric::LeadsWhatsapp),
            leads_instagram_total: f(Metric::LeadsInstagramTotal),
            appointments_whatsapp: f(Metric::AppointmentsWhatsapp),
            appointments_instagram: f(Metric::AppointmentsInstagram),
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::LeadsWhatsapp => self.leads_whatsapp,
            Metric::LeadsInstagramTotal => self.leads_instagram_total,
            Metric::AppointmentsWhatsapp => self.appointments_whatsapp,
            Metric::AppointmentsInstagram => self.appointments_instagram,
        }
    }
}

impl AddAssign for MetricValues {
    fn add_assign(&mut self, rhs: Self) {
        self.leads_whatsapp += rhs.leads_whatsapp;
        self.leads_instagram_total += rhs.leads_instagram_total;
        self.appointments_whatsapp += rhs.appointments_whatsapp;
        self.appointments_instagram += rhs.appointments_instagram;
    }
}

/// Calendar month bucket, rendered as zero-padded `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM` selection. Anything else, including surrounding
    /// whitespace, is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A normalized row with its parsed date, month bucket and coerced metrics.
///
/// `values` holds the row's text re-keyed under the schema (same order as
/// `Schema::columns`), so pass-through columns remain available for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRecord {
    /// 1-based source line (header is line 1).
    pub line: usize,
    pub date: Option<NaiveDate>,
    pub month_key: Option<MonthKey>,
    pub metrics: MetricValues,
    pub values: Vec<String>,
}

/// Per-date sums of every tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub totals: MetricValues,
}

/// Percentage split of leads between the two channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Shares {
    pub whatsapp: f64,
    pub instagram: f64,
}

/// Sums across a filtered set, plus the lead share per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SummaryTotals {
    pub record_count: usize,
    pub totals: MetricValues,
    pub whatsapp_share: f64,
    pub instagram_share: f64,
}
