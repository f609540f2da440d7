//! Core types for risk analytics inputs and reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_ROLLING_WINDOW;

/// Account balance at the close of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Account balance (must be positive).
    pub balance: Decimal,
}

impl BalancePoint {
    /// Create a balance point.
    #[must_use]
    pub const fn new(date: NaiveDate, balance: Decimal) -> Self {
        Self { date, balance }
    }
}

/// Daily return derived from two consecutive balances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    /// Date of the later balance.
    pub date: NaiveDate,
    /// Fractional return (`0.02` = 2%).
    pub daily_return: f64,
    /// Balance on `date`.
    pub balance: Decimal,
}

/// Benchmark daily return for a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketReturnPoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Fractional benchmark return.
    pub daily_return: f64,
}

/// Drawdown relative to the running peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    /// Date.
    pub date: NaiveDate,
    /// Drawdown in percent (always <= 0, e.g., -3.5 = 3.5% below peak).
    pub drawdown_percent: f64,
}

/// Trailing-window annualized volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingVolatilityPoint {
    /// Date of the window's last return.
    pub date: NaiveDate,
    /// Annualized volatility in percent.
    pub annualized_volatility_percent: f64,
}

/// How to handle VaR levels whose tail holds no observation (`n * p < 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VarTailPolicy {
    /// Fail with `InsufficientData`.
    Strict,
    /// Use the worst observed return (index 0) and flag it in diagnostics.
    #[default]
    ClampToWorst,
}

/// How to handle skewness/kurtosis of a zero-variance sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MomentPolicy {
    /// Fail with `DegenerateSample`.
    Surface,
    /// Report 0 and flag it in diagnostics.
    #[default]
    SubstituteZero,
}

/// Edge-case policies for a report computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsPolicy {
    /// VaR tail handling.
    #[serde(default)]
    pub var_tail: VarTailPolicy,
    /// Degenerate moment handling.
    #[serde(default)]
    pub moments: MomentPolicy,
    /// Drop Saturday/Sunday points before differencing.
    #[serde(default = "default_true")]
    pub skip_weekends: bool,
}

impl Default for AnalyticsPolicy {
    fn default() -> Self {
        Self {
            var_tail: VarTailPolicy::default(),
            moments: MomentPolicy::default(),
            skip_weekends: true,
        }
    }
}

impl AnalyticsPolicy {
    /// Policy that surfaces every edge case as an error.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            var_tail: VarTailPolicy::Strict,
            moments: MomentPolicy::Surface,
            skip_weekends: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Input contract for a risk report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEngineInput {
    /// Chronologically ordered balance curve.
    pub balance_curve: Vec<BalancePoint>,
    /// Annual risk-free rate (decimal, e.g., 0.045 = 4.5%).
    pub risk_free_rate_annual: f64,
    /// Assumed annual market return for alpha (decimal).
    pub assumed_market_return_annual: f64,
    /// Trailing window for rolling volatility.
    #[serde(default = "default_rolling_window")]
    pub rolling_window_size: usize,
    /// Benchmark daily returns; market-relative metrics are unavailable without it.
    #[serde(default)]
    pub market_returns: Option<Vec<MarketReturnPoint>>,
    /// Edge-case policies.
    #[serde(default)]
    pub policy: AnalyticsPolicy,
}

const fn default_rolling_window() -> usize {
    DEFAULT_ROLLING_WINDOW
}

impl RiskEngineInput {
    /// Create an input with default window, no market series and default policy.
    #[must_use]
    pub fn new(
        balance_curve: Vec<BalancePoint>,
        risk_free_rate_annual: f64,
        assumed_market_return_annual: f64,
    ) -> Self {
        Self {
            balance_curve,
            risk_free_rate_annual,
            assumed_market_return_annual,
            rolling_window_size: DEFAULT_ROLLING_WINDOW,
            market_returns: None,
            policy: AnalyticsPolicy::default(),
        }
    }

    /// Set the rolling volatility window.
    #[must_use]
    pub const fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window_size = window;
        self
    }

    /// Attach a benchmark return series.
    #[must_use]
    pub fn with_market_returns(mut self, market_returns: Vec<MarketReturnPoint>) -> Self {
        self.market_returns = Some(market_returns);
        self
    }

    /// Override the edge-case policies.
    #[must_use]
    pub const fn with_policy(mut self, policy: AnalyticsPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Volatility snapshot over the whole series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityMetrics {
    /// Daily volatility (percent).
    pub daily_volatility: f64,
    /// Annualized volatility (percent).
    pub annualized_volatility: f64,
    /// Sharpe ratio (0 when volatility is 0).
    pub sharpe_ratio: f64,
    /// Maximum drawdown (percent, <= 0).
    pub max_drawdown: f64,
    /// Calmar ratio (0 when max drawdown is 0).
    pub calmar_ratio: f64,
    /// Sortino ratio (0 when downside deviation is 0).
    pub sortino_ratio: f64,
    /// Skewness of daily returns.
    pub skewness: f64,
    /// Excess kurtosis of daily returns.
    pub excess_kurtosis: f64,
    /// 95% historical VaR (percent daily return).
    pub var_95: f64,
    /// 99% historical VaR (percent daily return).
    pub var_99: f64,
    /// Beta to the benchmark (`None` = unavailable).
    pub beta: Option<f64>,
    /// Jensen's alpha (percent, `None` = unavailable).
    pub alpha: Option<f64>,
}

/// Companion risk snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Annualized mean return (percent).
    pub annualized_return: f64,
    /// Annualized standard deviation (percent).
    pub annualized_std_dev: f64,
    /// Annualized downside deviation (percent).
    pub annualized_downside_deviation: f64,
    /// Upside capture (percent, `None` = unavailable).
    pub upside_capture_percent: Option<f64>,
    /// Downside capture (percent, `None` = unavailable).
    pub downside_capture_percent: Option<f64>,
    /// Correlation to the benchmark (`None` = unavailable).
    pub correlation_to_market: Option<f64>,
}

/// Record of every documented substitution applied while computing a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportDiagnostics {
    /// Number of weekend points dropped from the balance curve.
    pub weekend_points_dropped: usize,
    /// At least one VaR level was clamped to the worst observed return.
    pub var_tail_clamped: bool,
    /// Skewness/kurtosis were substituted with 0 for a zero-variance sample.
    pub moments_substituted: bool,
    /// Market-relative metrics were computed from a benchmark series.
    pub market_metrics_available: bool,
}

/// Complete risk report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Volatility snapshot.
    pub volatility: VolatilityMetrics,
    /// Risk snapshot.
    pub risk: RiskMetrics,
    /// Rolling annualized volatility series.
    pub rolling_volatility: Vec<RollingVolatilityPoint>,
    /// Drawdown series over the trading-day balance curve.
    pub drawdowns: Vec<DrawdownPoint>,
    /// Substitutions applied.
    pub diagnostics: ReportDiagnostics,
}
