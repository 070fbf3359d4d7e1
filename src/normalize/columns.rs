//! Header sanitation and the canonical schema.
//!
//! Spreadsheet exports tend to carry noisy headers: embedded line breaks,
//! stray quotes, doubled spaces and the occasional repeated column. The schema
//! is derived once from the header row and then resolves the date column and
//! the tracked metrics to fixed slots, so later stages never look columns up
//! by name.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{DATE_COLUMN, Metric};

/// Canonicalize one raw header.
///
/// Line feeds become spaces, carriage returns and double quotes are removed,
/// whitespace runs collapse to a single space and the result is trimmed.
/// Applying it twice yields the same string.
pub fn normalize_header(raw: &str) -> String {
    let cleaned: String = raw
        .trim_start_matches('\u{feff}')
        .chars()
        .filter_map(|ch| match ch {
            '\n' => Some(' '),
            '\r' | '"' => None,
            other => Some(other),
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered, de-duplicated canonical column names plus the resolved slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    /// Raw column index -> schema slot (`None` = dropped duplicate).
    positions: Vec<Option<usize>>,
    date_slot: Option<usize>,
    metric_slots: [Option<usize>; 4],
}

impl Schema {
    /// Build the schema from the raw header row.
    ///
    /// When two headers normalize to the same name, the first column wins and
    /// every later one is dropped (values are not merged).
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut positions = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (raw_idx, raw) in headers.into_iter().enumerate() {
            let name = normalize_header(raw.as_ref());
            if let Some(&first) = seen.get(&name) {
                debug!(column = %name, raw_index = raw_idx, first_index = first, "dropping duplicate column");
                positions.push(None);
                continue;
            }
            seen.insert(name.clone(), columns.len());
            positions.push(Some(columns.len()));
            columns.push(name);
        }

        let date_slot = seen.get(DATE_COLUMN).copied();
        if date_slot.is_none() {
            warn!(column = DATE_COLUMN, "date column missing; every row is treated as undated");
        }

        let mut metric_slots = [None; 4];
        for metric in Metric::ALL {
            metric_slots[metric as usize] = resolve_metric_slot(metric, &seen);
        }

        Self {
            columns,
            positions,
            date_slot,
            metric_slots,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Schema slot for a raw column index, or `None` if that column was dropped.
    pub fn position(&self, raw_index: usize) -> Option<usize> {
        self.positions.get(raw_index).copied().flatten()
    }

    pub fn date_slot(&self) -> Option<usize> {
        self.date_slot
    }

    pub fn metric_slot(&self, metric: Metric) -> Option<usize> {
        self.metric_slots[metric as usize]
    }

    /// Re-key a raw row under the schema.
    ///
    /// Dropped columns are skipped; short rows are padded with empty strings.
    pub fn normalize_row<I, S>(&self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = vec![String::new(); self.columns.len()];
        for (raw_idx, value) in fields.into_iter().enumerate() {
            if let Some(slot) = self.position(raw_idx) {
                out[slot] = value.as_ref().to_string();
            }
        }
        out
    }
}

fn resolve_metric_slot(metric: Metric, seen: &HashMap<String, usize>) -> Option<usize> {
    let primary = seen.get(metric.column_name()).copied();
    let alias = metric
        .column_aliases()
        .iter()
        .find_map(|name| seen.get(*name).map(|&slot| (*name, slot)));

    match (primary, alias) {
        (Some(slot), Some((alias_name, _))) => {
            warn!(
                metric = metric.key(),
                used = metric.column_name(),
                ignored = alias_name,
                "both Instagram lead columns are present; they may not measure the same thing"
            );
            Some(slot)
        }
        (Some(slot), None) => Some(slot),
        (None, Some((alias_name, slot))) => {
            debug!(metric = metric.key(), column = alias_name, "using alias column");
            Some(slot)
        }
        (None, None) => {
            warn!(
                metric = metric.key(),
                column = metric.column_name(),
                "tracked metric column missing; values default to 0"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_strips_noise() {
        assert_eq!(normalize_header(" DATA \n"), "DATA");
        assert_eq!(normalize_header("\"LEADS NOVOS\nWHATSAPP\""), "LEADS NOVOS WHATSAPP");
        assert_eq!(normalize_header("AGENDAMENTOS   \r\nINSTAGRAM"), "AGENDAMENTOS INSTAGRAM");
        assert_eq!(normalize_header("\u{feff}DATA"), "DATA");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn normalize_header_is_idempotent() {
        for raw in [" DATA \n", "\"TOTAL DE  LEADS\r\nÚTEIS INSTAGRAM\"", "plain", "\t a \t b "] {
            let once = normalize_header(raw);
            assert_eq!(normalize_header(&once), once);
        }
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let schema = Schema::from_headers([
            "DATA",
            "LEADS NOVOS WHATSAPP",
            "LEADS NOVOS WHATSAPP",
            " DATA \n",
        ]);
        assert_eq!(schema.columns(), ["DATA", "LEADS NOVOS WHATSAPP"]);
        assert_eq!(schema.position(0), Some(0));
        assert_eq!(schema.position(1), Some(1));
        assert_eq!(schema.position(2), None);
        assert_eq!(schema.position(3), None);

        let row = schema.normalize_row(["05/03/2024", "3", "99", "01/01/1999"]);
        assert_eq!(row, ["05/03/2024", "3"]);
    }

    #[test]
    fn resolves_date_and_metric_slots() {
        let schema = Schema::from_headers([
            "OBS",
            "DATA",
            "AGENDAMENTOS INSTAGRAM",
            "LEADS NOVOS WHATSAPP",
        ]);
        assert_eq!(schema.date_slot(), Some(1));
        assert_eq!(schema.metric_slot(Metric::LeadsWhatsapp), Some(3));
        assert_eq!(schema.metric_slot(Metric::AppointmentsInstagram), Some(2));
        assert_eq!(schema.metric_slot(Metric::AppointmentsWhatsapp), None);
    }

    #[test]
    fn instagram_leads_prefers_total_column_over_alias() {
        let alias_only = Schema::from_headers(["DATA", "LEADS ÚTEIS INSTAGRAM"]);
        assert_eq!(alias_only.metric_slot(Metric::LeadsInstagramTotal), Some(1));

        let both = Schema::from_headers(["DATA", "LEADS ÚTEIS INSTAGRAM", "TOTAL DE LEADS ÚTEIS INSTAGRAM"]);
        assert_eq!(both.metric_slot(Metric::LeadsInstagramTotal), Some(2));
    }

    #[test]
    fn short_rows_are_padded() {
        let schema = Schema::from_headers(["DATA", "A", "B"]);
        assert_eq!(schema.normalize_row(["01/02/2024"]), ["01/02/2024", "", ""]);
    }
}
