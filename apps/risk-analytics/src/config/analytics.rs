//! Analytics parameters for report computation.

use serde::{Deserialize, Serialize};

use crate::analytics::{
    AnalyticsPolicy, BalancePoint, DEFAULT_ROLLING_WINDOW, MarketReturnPoint, RiskEngineInput,
};

/// Analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Annual risk-free rate (decimal).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Assumed annual market return used for Jensen's alpha (decimal).
    #[serde(default = "default_assumed_market_return")]
    pub assumed_market_return: f64,
    /// Rolling volatility window in trading days.
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,
    /// Edge-case policies.
    #[serde(default)]
    pub policy: AnalyticsPolicy,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            assumed_market_return: default_assumed_market_return(),
            rolling_window: default_rolling_window(),
            policy: AnalyticsPolicy::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Build an engine input from these parameters.
    #[must_use]
    pub fn input_for(
        &self,
        balance_curve: Vec<BalancePoint>,
        market_returns: Option<Vec<MarketReturnPoint>>,
    ) -> RiskEngineInput {
        let input = RiskEngineInput::new(balance_curve, self.risk_free_rate, self.assumed_market_return)
            .with_rolling_window(self.rolling_window)
            .with_policy(self.policy);

        match market_returns {
            Some(series) => input.with_market_returns(series),
            None => input,
        }
    }
}

const fn default_risk_free_rate() -> f64 {
    0.045
}

const fn default_assumed_market_return() -> f64 {
    0.10
}

const fn default_rolling_window() -> usize {
    DEFAULT_ROLLING_WINDOW
}
