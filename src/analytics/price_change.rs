use crate::analytics::{FundPerformance, PricePoint};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Calendar days in the 1-week window
const WEEK_DAYS: u64 = 7;

/// Trailing percentage changes of a fund's close over fixed windows.
/// `None` means no usable base price existed for that window.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriceChanges {
    #[serde(rename = "priceChange1w")]
    pub change_1w: Option<f64>,
    #[serde(rename = "priceChange1m")]
    pub change_1m: Option<f64>,
    #[serde(rename = "priceChange3m")]
    pub change_3m: Option<f64>,
    #[serde(rename = "priceChangeYtd")]
    pub change_ytd: Option<f64>,
    #[serde(rename = "priceChange1y")]
    pub change_1y: Option<f64>,
}

impl PriceChanges {
    /// Scorer input built from these changes.
    pub fn performance(&self, avg_volume: Option<f64>) -> FundPerformance {
        FundPerformance {
            price_change_1w: self.change_1w,
            price_change_1m: self.change_1m,
            avg_volume,
        }
    }
}

/// Close of the latest point dated on or before `target`.
fn close_on_or_before(history: &[PricePoint], target: NaiveDate) -> Option<f64> {
    history
        .iter()
        .filter(|p| p.date <= target)
        .max_by_key(|p| p.date)
        .map(|p| p.close)
}

#[inline]
fn pct_change(current: f64, base: Option<f64>) -> Option<f64> {
    match base {
        Some(b) if b != 0.0 => Some((current - b) / b * 100.0),
        _ => None,
    }
}

/// Percentage change from each window's base close to the latest close on or
/// before `as_of`. Points dated after `as_of` are ignored. History may be in any
/// order. Returns None when no point exists on or before `as_of`.
pub fn compute_price_changes(history: &[PricePoint], as_of: NaiveDate) -> Option<PriceChanges> {
    let current = close_on_or_before(history, as_of)?;

    let base_days_ago = |days: u64| {
        as_of
            .checked_sub_days(Days::new(days))
            .and_then(|d| close_on_or_before(history, d))
    };
    let base_months_ago = |months: u32| {
        as_of
            .checked_sub_months(Months::new(months))
            .and_then(|d| close_on_or_before(history, d))
    };
    let year_start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1)
        .and_then(|d| close_on_or_before(history, d));

    Some(PriceChanges {
        change_1w: pct_change(current, base_days_ago(WEEK_DAYS)),
        change_1m: pct_change(current, base_months_ago(1)),
        change_3m: pct_change(current, base_months_ago(3)),
        change_ytd: pct_change(current, year_start),
        change_1y: pct_change(current, base_months_ago(12)),
    })
}
