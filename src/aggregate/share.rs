//! Channel share of total leads.

use crate::domain::Shares;

/// Percentage of the combined total per channel, each rounded to two decimals.
///
/// A combined total `<= 0` gives `0.0` for both. Rounding is independent per
/// channel, so the pair may add up to 99.99 or 100.01.
pub fn compute_shares(total_whatsapp: f64, total_instagram: f64) -> Shares {
    let total = total_whatsapp + total_instagram;
    if total.is_nan() || total <= 0.0 {
        return Shares::default();
    }
    Shares {
        whatsapp: round2(100.0 * total_whatsapp / total),
        instagram: round2(100.0 * total_instagram / total),
    }
}

/// Round to two decimals, exact halves to the even digit.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
