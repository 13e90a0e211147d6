use crate::analytics::PricePoint;
use statrs::statistics::Statistics;

/// Pearson correlation of two series.
///
/// Both series are truncated to the shorter length n, then
///
///   rho = cov(a, b) / sqrt(var(a) * var(b))
///
/// Total: returns 0.0 when n < 2 or when either series has zero variance,
/// so "uncorrelated" and "not computable" are indistinguishable here.
pub fn compute_correlation(series_a: &[f64], series_b: &[f64]) -> f64 {
    let n = series_a.len().min(series_b.len());
    if n < 2 {
        return 0.0;
    }

    let a = &series_a[..n];
    let b = &series_b[..n];

    let mean_a = a.iter().mean();
    let mean_b = b.iter().mean();

    let mut cov: f64 = 0.0;
    let mut var_a: f64 = 0.0;
    let mut var_b: f64 = 0.0;

    for (&x, &y) in a.iter().zip(b) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        cov / denom
    }
}

/// Period-over-period fractional returns of an ordered price series.
/// Steps whose previous close is zero are skipped.
pub fn simple_returns(points: &[PricePoint]) -> Vec<f64> {
    points
        .windows(2)
        .filter(|w| w[0].close != 0.0)
        .map(|w| w[1].close / w[0].close - 1.0)
        .collect()
}
