use crate::analytics::PricePoint;
use chrono::NaiveDate;

/// Index level every series starts at
pub const BASE_INDEX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Rebase a price series so its first point is 100.
/// Empty input, or a first close that is zero or non-finite, yields an empty series.
pub fn normalize_returns(points: &[PricePoint]) -> Vec<NormalizedPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let base = first.close;
    if base == 0.0 || !base.is_finite() {
        tracing::debug!(base, "cannot rebase series on degenerate first close");
        return Vec::new();
    }

    points
        .iter()
        .map(|p| NormalizedPoint {
            date: p.date,
            value: p.close / base * BASE_INDEX,
        })
        .collect()
}
