/// Pairwise holdings overlap.
///
/// For funds A and B with distinct security sets:
///
///   overlap_pct = 100 * |A ∩ B| / |A ∪ B|
///
/// i.e. a Jaccard index expressed as a percentage. Pure function.

use crate::analytics::{FundHoldings, HoldingRef};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Maximum number of shared tickers echoed back per pair
pub const SHARED_HOLDINGS_CAP: usize = 20;

/// Overlap between one unordered pair of funds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    pub pair: [String; 2],
    pub shared_count: usize,
    pub unique_a: usize,
    pub unique_b: usize,
    pub overlap_pct: f64,
    /// At most SHARED_HOLDINGS_CAP entries, in fund A's holding order
    pub shared_holdings: SmallVec<[String; SHARED_HOLDINGS_CAP]>,
}

/// Distinct non-null security tickers, in first-seen order.
fn security_set(holdings: &[HoldingRef]) -> (Vec<&str>, HashSet<&str>) {
    let mut ordered = Vec::with_capacity(holdings.len());
    let mut seen = HashSet::with_capacity(holdings.len());
    for ticker in holdings.iter().filter_map(|h| h.security_ticker.as_deref()) {
        if seen.insert(ticker) {
            ordered.push(ticker);
        }
    }
    (ordered, seen)
}

/// Compare every unordered pair of funds, in input order.
/// Produces n*(n-1)/2 results; callers enforce any bound on n.
pub fn compute_pairwise_overlap(funds: &[FundHoldings]) -> Vec<OverlapResult> {
    let sets: Vec<_> = funds.iter().map(|f| security_set(&f.holdings)).collect();
    let n = funds.len();
    let mut results = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    for i in 0..n {
        for j in (i + 1)..n {
            let (ordered_a, set_a) = &sets[i];
            let (_, set_b) = &sets[j];

            let shared: Vec<&str> = ordered_a
                .iter()
                .copied()
                .filter(|t| set_b.contains(t))
                .collect();

            let shared_count = shared.len();
            let union = set_a.len() + set_b.len() - shared_count;
            let overlap_pct = if union > 0 {
                shared_count as f64 / union as f64 * 100.0
            } else {
                0.0
            };

            results.push(OverlapResult {
                pair: [funds[i].ticker.clone(), funds[j].ticker.clone()],
                shared_count,
                unique_a: set_a.len() - shared_count,
                unique_b: set_b.len() - shared_count,
                overlap_pct,
                shared_holdings: shared
                    .into_iter()
                    .take(SHARED_HOLDINGS_CAP)
                    .map(str::to_string)
                    .collect(),
            });
        }
    }

    tracing::debug!(funds = n, pairs = results.len(), "pairwise overlap computed");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fund(ticker: &str, securities: &[Option<&str>]) -> FundHoldings {
        FundHoldings {
            ticker: ticker.to_string(),
            holdings: securities.iter().map(|s| HoldingRef::new(ticker, *s)).collect(),
        }
    }

    #[test]
    fn test_worked_example() {
        let funds = vec![
            fund("X", &[Some("AAPL"), Some("MSFT"), Some("GOOG")]),
            fund("Y", &[Some("AAPL"), Some("MSFT"), Some("AMZN")]),
        ];
        let results = compute_pairwise_overlap(&funds);
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.pair, ["X".to_string(), "Y".to_string()]);
        assert_eq!(r.shared_count, 2);
        assert_eq!(r.unique_a, 1);
        assert_eq!(r.unique_b, 1);
        assert!((r.overlap_pct - 50.0).abs() < 1e-12, "pct={}", r.overlap_pct);
        assert!(r.shared_holdings.iter().any(|t| t == "AAPL"));
        assert!(r.shared_holdings.iter().any(|t| t == "MSFT"));
    }

    #[test]
    fn test_symmetry() {
        let a = fund("A", &[Some("AAPL"), Some("NVDA"), Some("MSFT"), Some("META")]);
        let b = fund("B", &[Some("NVDA"), Some("TSLA")]);
        let ab = compute_pairwise_overlap(&[a.clone(), b.clone()]).remove(0);
        let ba = compute_pairwise_overlap(&[b, a]).remove(0);
        assert_eq!(ab.shared_count, ba.shared_count);
        assert!((ab.overlap_pct - ba.overlap_pct).abs() < 1e-12);
        assert_eq!(ab.unique_a, ba.unique_b);
        assert_eq!(ab.unique_b, ba.unique_a);
    }

    #[test]
    fn test_null_tickers_dropped() {
        let funds = vec![
            fund("A", &[Some("AAPL"), None, None]),
            fund("B", &[Some("AAPL"), None]),
        ];
        let r = &compute_pairwise_overlap(&funds)[0];
        assert_eq!(r.shared_count, 1);
        assert_eq!(r.unique_a, 0);
        assert_eq!(r.unique_b, 0);
        assert!((r.overlap_pct - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_fund_zero_overlap() {
        let funds = vec![
            fund("EMPTY", &[None]),
            fund("B", &[Some("AAPL"), Some("MSFT"), Some("MSFT")]),
        ];
        let r = &compute_pairwise_overlap(&funds)[0];
        assert_eq!(r.shared_count, 0);
        assert_eq!(r.unique_a, 0);
        assert_eq!(r.unique_b, 2, "duplicates count once");
        assert_eq!(r.overlap_pct, 0.0);
    }

    #[test]
    fn test_both_empty_no_division_by_zero() {
        let funds = vec![fund("A", &[]), fund("B", &[])];
        let r = &compute_pairwise_overlap(&funds)[0];
        assert_eq!(r.overlap_pct, 0.0);
        assert!(r.shared_holdings.is_empty());
    }

    #[test]
    fn test_all_pairs_generated() {
        let funds: Vec<_> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|t| fund(t, &[Some("SPY")]))
            .collect();
        let results = compute_pairwise_overlap(&funds);
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].pair, ["A".to_string(), "B".to_string()]);
        assert_eq!(results[9].pair, ["D".to_string(), "E".to_string()]);
    }

    #[test]
    fn test_shared_holdings_capped() {
        let names: Vec<String> = (0..30).map(|i| format!("S{i:02}")).collect();
        let refs: Vec<Option<&str>> = names.iter().map(|s| Some(s.as_str())).collect();
        let funds = vec![fund("A", &refs), fund("B", &refs)];
        let r = &compute_pairwise_overlap(&funds)[0];
        assert_eq!(r.shared_count, 30);
        assert_eq!(r.shared_holdings.len(), SHARED_HOLDINGS_CAP);
        assert_eq!(r.shared_holdings[0], "S00");
    }

    #[test]
    fn test_bounds_hold() {
        let funds = vec![
            fund("A", &[Some("1"), Some("2"), Some("3")]),
            fund("B", &[Some("3"), Some("4")]),
            fund("C", &[Some("1"), Some("2"), Some("3"), Some("4"), Some("5")]),
        ];
        let distinct = |f: &FundHoldings| {
            f.holdings
                .iter()
                .filter_map(|h| h.security_ticker.clone())
                .collect::<HashSet<String>>()
                .len()
        };
        let sizes: Vec<usize> = funds.iter().map(distinct).collect();
        let results = compute_pairwise_overlap(&funds);
        let pairs = [(0, 1), (0, 2), (1, 2)];
        assert_eq!(results.len(), pairs.len());
        for (r, &(i, j)) in results.iter().zip(&pairs) {
            assert!((0.0..=100.0).contains(&r.overlap_pct), "pct out of range: {}", r.overlap_pct);
            assert!(r.shared_count <= sizes[i].min(sizes[j]), "shared {} exceeds smaller fund", r.shared_count);
            assert_eq!(r.shared_count + r.unique_a, sizes[i]);
            assert_eq!(r.shared_count + r.unique_b, sizes[j]);
        }
        // A = {1,2,3}, C = {1,2,3,4,5}
        assert_eq!(results[1].shared_count, 3);
        assert!((results[1].overlap_pct - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_serialized_shape() {
        let funds = vec![fund("X", &[Some("AAPL")]), fund("Y", &[Some("AAPL")])];
        let json = serde_json::to_value(&compute_pairwise_overlap(&funds)[0]).unwrap();
        assert_eq!(json["pair"], serde_json::json!(["X", "Y"]));
        assert_eq!(json["sharedCount"], 1);
        assert_eq!(json["uniqueA"], 0);
        assert_eq!(json["uniqueB"], 0);
        assert_eq!(json["overlapPct"], 100.0);
        assert_eq!(json["sharedHoldings"], serde_json::json!(["AAPL"]));
    }
}
