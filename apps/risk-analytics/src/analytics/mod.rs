//! Performance volatility and risk-analytics calculations.
//!
//! Implements standard quantitative risk metrics over a daily balance curve:
//! - Daily and annualized volatility (population standard deviation)
//! - Sharpe, Sortino and Calmar ratios with zero-denominator clamps
//! - Maximum drawdown and the full drawdown series
//! - Skewness and excess kurtosis of daily returns
//! - Historical-simulation Value-at-Risk (95% / 99%)
//! - Rolling annualized volatility over a trailing window
//! - Beta, alpha, correlation and capture ratios against a benchmark series

mod assessment;
mod calculator;
mod constants;
mod drawdown;
mod format;
mod market;
mod moments;
mod returns;
mod rolling;
mod types;
mod var;

pub use assessment::{PerformanceQuality, RiskAssessment, VolatilityProfile};
pub use calculator::{RiskMetricsCalculator, compute_risk_report};
pub use constants::{DEFAULT_ROLLING_WINDOW, TRADING_DAYS_PER_YEAR, annualization_factor};
pub use drawdown::{DrawdownState, DrawdownTracker};
pub use format::{format_moment, format_optional_pct, format_optional_ratio, format_pct, format_ratio};
pub use market::{MarketComparison, align_market_returns};
pub use moments::{excess_kurtosis, mean, population_std_dev, population_variance, skewness};
pub use returns::ReturnSeriesBuilder;
pub use rolling::{RollingVolatilityState, RollingWindowVolatility};
pub use types::{
    AnalyticsPolicy, BalancePoint, DrawdownPoint, MarketReturnPoint, MomentPolicy,
    ReportDiagnostics, ReturnPoint, RiskEngineInput, RiskMetrics, RiskReport,
    RollingVolatilityPoint, VarTailPolicy, VolatilityMetrics,
};
pub use var::{VarConfidence, VarEstimate, historical_var};
