//! Day-first date parsing and month bucketing.

use chrono::NaiveDate;

use crate::domain::MonthKey;

/// Parse a day-first date (`DD/MM/YYYY`, also `-` or `.` separated).
///
/// Two-digit years follow chrono's `%y` pivot (`70`-`99` are 19xx, `00`-`69` are 20xx), a
/// trailing time-of-day token is ignored (`05/03/2024 14:30`) and ISO
/// `YYYY-MM-DD` is accepted as well. Anything else, including impossible
/// calendar dates, yields `None`.
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    // Two-digit forms go first: `%Y` would read `99` as the year 99.
    const FMTS: [&str; 7] = [
        "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d",
    ];
    let token = raw.split_whitespace().next()?;
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// Month bucket for a parsed date; `None` stays `None`.
pub fn month_key(date: Option<NaiveDate>) -> Option<MonthKey> {
    date.map(MonthKey::from_date)
}
