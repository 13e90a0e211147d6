use crate::analytics::expense::ExpenseProjectionRow;
use crate::analytics::momentum::{FundSnapshot, MomentumRanking};
use crate::analytics::normalize::NormalizedPoint;
use crate::analytics::overlap::OverlapResult;
use crate::analytics::price_change::PriceChanges;
use crate::analytics::{FundHoldings, PricePoint};
use chrono::NaiveDate;
use portable_atomic::{AtomicU64, Ordering};

// ── Requests INTO the analytics layer ──

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalyticsRequest {
    #[serde(rename_all = "camelCase")]
    Overlap { funds: Vec<FundHoldings> },

    #[serde(rename_all = "camelCase")]
    HotCold {
        funds: Vec<FundSnapshot>,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        limit: Option<usize>,
    },

    #[serde(rename_all = "camelCase")]
    Correlation { series_a: Vec<f64>, series_b: Vec<f64> },

    #[serde(rename_all = "camelCase")]
    CorrelatePrices {
        prices_a: Vec<PricePoint>,
        prices_b: Vec<PricePoint>,
    },

    #[serde(rename_all = "camelCase")]
    Expense {
        principal: f64,
        years: u32,
        expense_ratio_a: f64,
        expense_ratio_b: f64,
        #[serde(default)]
        annual_return: Option<f64>,
    },

    #[serde(rename_all = "camelCase")]
    Normalize { prices: Vec<PricePoint> },

    #[serde(rename_all = "camelCase")]
    PriceChanges {
        prices: Vec<PricePoint>,
        #[serde(default)]
        as_of: Option<NaiveDate>,
    },
}

impl AnalyticsRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Overlap { .. } => "overlap",
            Self::HotCold { .. } => "hotCold",
            Self::Correlation { .. } => "correlation",
            Self::CorrelatePrices { .. } => "correlatePrices",
            Self::Expense { .. } => "expense",
            Self::Normalize { .. } => "normalize",
            Self::PriceChanges { .. } => "priceChanges",
        }
    }
}

// ── Results OUT of the analytics layer ──

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalyticsResponse {
    Overlap { overlap: Vec<OverlapResult> },

    HotCold { rankings: Vec<MomentumRanking> },

    Correlation { correlation: f64 },

    #[serde(rename_all = "camelCase")]
    Expense { yearly_data: Vec<ExpenseProjectionRow> },

    Normalize { series: Vec<NormalizedPoint> },

    #[serde(rename_all = "camelCase")]
    PriceChanges {
        as_of: NaiveDate,
        changes: Option<PriceChanges>,
    },
}

// ── Batch output record ──

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    pub request_id: String,
    pub source: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalyticsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ── Performance Counters (lock-free) ──

pub struct PerfCounters {
    pub requests_received: AtomicU64,
    pub requests_succeeded: AtomicU64,
    pub requests_failed: AtomicU64,
    pub records_written: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            requests_received: AtomicU64::new(0),
            requests_succeeded: AtomicU64::new(0),
            requests_failed: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
        }
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            received: self.requests_received.load(Ordering::Relaxed),
            succeeded: self.requests_succeeded.load(Ordering::Relaxed),
            failed: self.requests_failed.load(Ordering::Relaxed),
            written: self.records_written.load(Ordering::Relaxed),
        }
    }
}

impl Default for PerfCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub received: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub written: u64,
}
