pub mod overlap;
pub mod momentum;
pub mod correlation;
pub mod expense;
pub mod normalize;
pub mod price_change;

use chrono::NaiveDate;

/// A single holding row as supplied by the data layer.
/// Rows without a resolvable security ticker cannot take part in overlap.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRef {
    #[serde(default)]
    pub etf_ticker: String,
    pub security_ticker: Option<String>,
}

impl HoldingRef {
    pub fn new(etf_ticker: &str, security_ticker: Option<&str>) -> Self {
        Self {
            etf_ticker: etf_ticker.to_string(),
            security_ticker: security_ticker.map(str::to_string),
        }
    }
}

/// One fund and its holdings. A slice of these is the ordered
/// fund -> holdings mapping the overlap analyzer walks.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundHoldings {
    pub ticker: String,
    pub holdings: Vec<HoldingRef>,
}

/// Daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Trailing performance used by the momentum scorer.
/// Percentages are plain numbers: 3.5 means +3.5%.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundPerformance {
    #[serde(default, rename = "priceChange1w")]
    pub price_change_1w: Option<f64>,
    #[serde(default, rename = "priceChange1m")]
    pub price_change_1m: Option<f64>,
    #[serde(default)]
    pub avg_volume: Option<f64>,
}

/// Round to whole cents, half away from zero.
#[inline]
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
