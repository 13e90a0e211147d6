use crate::analytics::FundPerformance;

/// Weight on the 1-week percentage change
pub const WEIGHT_1W: f64 = 0.4;
/// Weight on the 1-month percentage change
pub const WEIGHT_1M: f64 = 0.6;

/// Raw composite is divided by this before clamping.
/// ETF returns over these windows rarely exceed +/-10%.
pub const SCORE_DIVISOR: f64 = 10.0;
pub const SCORE_MIN: f64 = -1.0;
pub const SCORE_MAX: f64 = 1.0;

/// Heat thresholds. Each bucket is `score > threshold`; boundaries fall to the lower bucket.
pub const HOT_THRESHOLD: f64 = 0.3;
pub const WARM_THRESHOLD: f64 = 0.1;
pub const NEUTRAL_THRESHOLD: f64 = -0.1;
pub const COOL_THRESHOLD: f64 = -0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    Hot,
    Warm,
    Neutral,
    Cool,
    Cold,
}

impl std::fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hot => write!(f, "hot"),
            Self::Warm => write!(f, "warm"),
            Self::Neutral => write!(f, "neutral"),
            Self::Cool => write!(f, "cool"),
            Self::Cold => write!(f, "cold"),
        }
    }
}

/// Composite momentum score in [-1, 1].
///
/// raw   = 0.4 * change_1w + 0.6 * change_1m   (missing values contribute 0)
/// score = clamp(raw / 10, -1, 1)
///
/// `avg_volume` is carried on the input but does not enter the formula.
#[inline]
pub fn compute_momentum_score(perf: &FundPerformance) -> f64 {
    let w1 = perf.price_change_1w.unwrap_or(0.0);
    let m1 = perf.price_change_1m.unwrap_or(0.0);

    let raw = WEIGHT_1W * w1 + WEIGHT_1M * m1;
    (raw / SCORE_DIVISOR).clamp(SCORE_MIN, SCORE_MAX)
}

#[inline]
pub fn heat_level(score: f64) -> HeatLevel {
    if score > HOT_THRESHOLD {
        HeatLevel::Hot
    } else if score > WARM_THRESHOLD {
        HeatLevel::Warm
    } else if score > NEUTRAL_THRESHOLD {
        HeatLevel::Neutral
    } else if score > COOL_THRESHOLD {
        HeatLevel::Cool
    } else {
        HeatLevel::Cold
    }
}

/// Fund row as listed for the hot/cold board.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSnapshot {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, rename = "priceChange1d")]
    pub price_change_1d: Option<f64>,
    #[serde(default, rename = "priceChange1w")]
    pub price_change_1w: Option<f64>,
    #[serde(default, rename = "priceChange1m")]
    pub price_change_1m: Option<f64>,
    #[serde(default)]
    pub aum: Option<f64>,
    #[serde(default)]
    pub avg_volume: Option<f64>,
}

impl FundSnapshot {
    pub fn performance(&self) -> FundPerformance {
        FundPerformance {
            price_change_1w: self.price_change_1w,
            price_change_1m: self.price_change_1m,
            avg_volume: self.avg_volume,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumRanking {
    pub ticker: String,
    pub name: String,
    pub issuer: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    #[serde(rename = "priceChange1d")]
    pub price_change_1d: Option<f64>,
    #[serde(rename = "priceChange1w")]
    pub price_change_1w: Option<f64>,
    #[serde(rename = "priceChange1m")]
    pub price_change_1m: Option<f64>,
    pub aum: Option<f64>,
    pub momentum_score: f64,
    pub heat_level: HeatLevel,
}

/// Score every fund and sort hottest first. Ties keep input order.
pub fn rank_by_momentum(funds: Vec<FundSnapshot>) -> Vec<MomentumRanking> {
    let mut ranked: Vec<MomentumRanking> = funds
        .into_iter()
        .map(|f| {
            let score = compute_momentum_score(&f.performance());
            MomentumRanking {
                ticker: f.ticker,
                name: f.name,
                issuer: f.issuer,
                category: f.category,
                price: f.price,
                price_change_1d: f.price_change_1d,
                price_change_1w: f.price_change_1w,
                price_change_1m: f.price_change_1m,
                aum: f.aum,
                momentum_score: score,
                heat_level: heat_level(score),
            }
        })
        .collect();

    // -0.0 and 0.0 compare equal here, so they stay in input order
    ranked.sort_by(|a, b| {
        b.momentum_score
            .partial_cmp(&a.momentum_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
