use crate::analytics::correlation::{compute_correlation, simple_returns};
use crate::analytics::expense::{project_expenses, ExpenseParams};
use crate::analytics::momentum::{rank_by_momentum, FundSnapshot};
use crate::analytics::normalize::normalize_returns;
use crate::analytics::overlap::compute_pairwise_overlap;
use crate::analytics::price_change::compute_price_changes;
use crate::analytics::{FundHoldings, PricePoint};
use crate::config::AppConfig;
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::state::{AnalyticsRequest, AnalyticsResponse};

/// Longest expense projection horizon accepted from a request
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Validate a request and run the matching analytics function.
/// The analytics layer is total; everything that can be rejected is rejected here.
pub fn dispatch(request: AnalyticsRequest, config: &AppConfig) -> AnalyticsResult<AnalyticsResponse> {
    let kind = request.kind();
    tracing::debug!(kind, "dispatching request");

    match request {
        AnalyticsRequest::Overlap { funds } => {
            let funds = prepare_overlap_funds(funds, config)?;
            let overlap = compute_pairwise_overlap(&funds);
            tracing::info!(funds = funds.len(), pairs = overlap.len(), "overlap computed");
            Ok(AnalyticsResponse::Overlap { overlap })
        }

        AnalyticsRequest::HotCold { funds, category, limit } => {
            for f in &funds {
                ensure_finite_opt(&f.ticker, &[f.price_change_1w, f.price_change_1m, f.avg_volume, f.aum])?;
            }
            let limit = limit.unwrap_or(config.hot_cold_limit);
            let board = largest_by_aum(filter_category(funds, category.as_deref()), limit);
            let rankings = rank_by_momentum(board);
            tracing::info!(count = rankings.len(), limit, "momentum rankings computed");
            Ok(AnalyticsResponse::HotCold { rankings })
        }

        AnalyticsRequest::Correlation { series_a, series_b } => {
            ensure_finite("seriesA", &series_a)?;
            ensure_finite("seriesB", &series_b)?;
            let correlation = compute_correlation(&series_a, &series_b);
            Ok(AnalyticsResponse::Correlation { correlation })
        }

        AnalyticsRequest::CorrelatePrices { mut prices_a, mut prices_b } => {
            ensure_finite_prices("pricesA", &prices_a)?;
            ensure_finite_prices("pricesB", &prices_b)?;
            prices_a.sort_by_key(|p| p.date);
            prices_b.sort_by_key(|p| p.date);
            let (a, b) = align_on_dates(&prices_a, &prices_b);
            let correlation = compute_correlation(&simple_returns(&a), &simple_returns(&b));
            tracing::debug!(aligned = a.len(), correlation, "price correlation computed");
            Ok(AnalyticsResponse::Correlation { correlation })
        }

        AnalyticsRequest::Expense {
            principal,
            years,
            expense_ratio_a,
            expense_ratio_b,
            annual_return,
        } => {
            let annual_return = annual_return.unwrap_or(config.annual_return);
            ensure_finite("expense", &[principal, expense_ratio_a, expense_ratio_b, annual_return])?;
            if years > MAX_PROJECTION_YEARS {
                return Err(AnalyticsError::InvalidRequest(format!(
                    "years must be at most {MAX_PROJECTION_YEARS}, got {years}"
                )));
            }
            let params = ExpenseParams::new(principal, years, expense_ratio_a, expense_ratio_b)
                .with_annual_return(annual_return);
            Ok(AnalyticsResponse::Expense {
                yearly_data: project_expenses(&params),
            })
        }

        AnalyticsRequest::Normalize { prices } => {
            ensure_finite_prices("prices", &prices)?;
            if prices.first().is_some_and(|p| p.close == 0.0) {
                return Err(AnalyticsError::InvalidRequest(
                    "prices: first close is zero, series cannot be rebased".into(),
                ));
            }
            Ok(AnalyticsResponse::Normalize {
                series: normalize_returns(&prices),
            })
        }

        AnalyticsRequest::PriceChanges { prices, as_of } => {
            ensure_finite_prices("prices", &prices)?;
            let as_of = as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let changes = compute_price_changes(&prices, as_of);
            if changes.is_none() {
                tracing::warn!(%as_of, "no prices on or before asOf");
            }
            Ok(AnalyticsResponse::PriceChanges { as_of, changes })
        }
    }
}

/// Uppercase tickers, enforce the fund-count bounds, collapse duplicates.
/// The bound applies to the list as supplied. A repeated ticker keeps its
/// first position and takes the last holdings list given for it.
fn prepare_overlap_funds(funds: Vec<FundHoldings>, config: &AppConfig) -> AnalyticsResult<Vec<FundHoldings>> {
    if funds.len() < config.min_overlap_funds || funds.len() > config.max_overlap_funds {
        return Err(AnalyticsError::InvalidRequest(format!(
            "provide {}-{} tickers, got {}",
            config.min_overlap_funds,
            config.max_overlap_funds,
            funds.len()
        )));
    }

    let mut out: Vec<FundHoldings> = Vec::with_capacity(funds.len());
    for fund in funds {
        let ticker = fund.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(AnalyticsError::InvalidRequest("empty ticker".into()));
        }
        match out.iter_mut().find(|f| f.ticker == ticker) {
            Some(existing) => existing.holdings = fund.holdings,
            None => out.push(FundHoldings {
                ticker,
                holdings: fund.holdings,
            }),
        }
    }
    Ok(out)
}

fn filter_category(funds: Vec<FundSnapshot>, category: Option<&str>) -> Vec<FundSnapshot> {
    match category {
        Some(c) => funds
            .into_iter()
            .filter(|f| f.category.as_deref() == Some(c))
            .collect(),
        None => funds,
    }
}

/// The `limit` largest funds by AUM, funds without AUM last. Ties keep input order.
fn largest_by_aum(mut funds: Vec<FundSnapshot>, limit: usize) -> Vec<FundSnapshot> {
    funds.sort_by(|a, b| match (a.aum, b.aum) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    funds.truncate(limit);
    funds
}

/// Keep only dates present in both (already date-sorted) series.
fn align_on_dates(a: &[PricePoint], b: &[PricePoint]) -> (Vec<PricePoint>, Vec<PricePoint>) {
    let mut out_a = Vec::with_capacity(a.len().min(b.len()));
    let mut out_b = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].date.cmp(&b[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out_a.push(a[i]);
                out_b.push(b[j]);
                i += 1;
                j += 1;
            }
        }
    }
    (out_a, out_b)
}

fn ensure_finite(field: &str, values: &[f64]) -> AnalyticsResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidRequest(format!("{field}: non-finite number")))
    }
}

fn ensure_finite_opt(field: &str, values: &[Option<f64>]) -> AnalyticsResult<()> {
    if values.iter().flatten().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidRequest(format!("{field}: non-finite number")))
    }
}

fn ensure_finite_prices(field: &str, prices: &[PricePoint]) -> AnalyticsResult<()> {
    if prices.iter().all(|p| p.close.is_finite()) {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidRequest(format!("{field}: non-finite close")))
    }
}
