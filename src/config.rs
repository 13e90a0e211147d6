use crate::errors::{AnalyticsError, AnalyticsResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gross annual return assumed by the expense projector when a request omits it
    pub annual_return: f64,
    pub min_overlap_funds: usize,
    pub max_overlap_funds: usize,
    /// Default number of rows returned by a hot/cold ranking
    pub hot_cold_limit: usize,
    pub batch_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            annual_return: 0.08,
            min_overlap_funds: 2,
            max_overlap_funds: 5,
            hot_cold_limit: 50,
            batch_concurrency: 8,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AnalyticsResult<Self> {
        dotenvy::dotenv().ok();

        let annual_return = env_var_or("ANNUAL_RETURN", "0.08")
            .parse::<f64>()
            .map_err(|e| AnalyticsError::Config(format!("ANNUAL_RETURN: {e}")))?;

        let min_overlap_funds = env_var_or("MIN_OVERLAP_FUNDS", "2")
            .parse::<usize>()
            .map_err(|e| AnalyticsError::Config(format!("MIN_OVERLAP_FUNDS: {e}")))?;

        let max_overlap_funds = env_var_or("MAX_OVERLAP_FUNDS", "5")
            .parse::<usize>()
            .map_err(|e| AnalyticsError::Config(format!("MAX_OVERLAP_FUNDS: {e}")))?;

        let hot_cold_limit = env_var_or("HOT_COLD_LIMIT", "50")
            .parse::<usize>()
            .map_err(|e| AnalyticsError::Config(format!("HOT_COLD_LIMIT: {e}")))?;

        let batch_concurrency = env_var_or("BATCH_CONCURRENCY", "8")
            .parse::<usize>()
            .map_err(|e| AnalyticsError::Config(format!("BATCH_CONCURRENCY: {e}")))?;

        let config = Self {
            annual_return,
            min_overlap_funds,
            max_overlap_funds,
            hot_cold_limit,
            batch_concurrency,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.annual_return.is_finite() {
            return Err(AnalyticsError::Config("ANNUAL_RETURN must be finite".into()));
        }
        if self.min_overlap_funds < 2 || self.min_overlap_funds > self.max_overlap_funds {
            return Err(AnalyticsError::Config(format!(
                "overlap fund bounds invalid: min={} max={}",
                self.min_overlap_funds, self.max_overlap_funds
            )));
        }
        if self.batch_concurrency == 0 {
            return Err(AnalyticsError::Config("BATCH_CONCURRENCY must be > 0".into()));
        }
        Ok(())
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.min_overlap_funds, 2);
        assert_eq!(cfg.max_overlap_funds, 5);
        assert!((cfg.annual_return - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let cfg = AppConfig {
            min_overlap_funds: 6,
            max_overlap_funds: 5,
            ..AppConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(AnalyticsError::Config(_))));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let cfg = AppConfig {
            batch_concurrency: 0,
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
