// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Risk Analytics - Rust Core Library
//!
//! Deterministic performance volatility and risk-analytics engine for the
//! trading bot dashboard.
//!
//! # Layout
//!
//! - **analytics**: the pure computation core
//!   - `returns`: balance curve to daily returns (weekend filtering, validation)
//!   - `moments`: mean, population variance, skewness, excess kurtosis
//!   - `drawdown`: streaming running-peak drawdown tracker
//!   - `rolling`: streaming trailing-window annualized volatility
//!   - `var`: historical-simulation Value-at-Risk
//!   - `market`: beta, alpha, correlation and capture against a benchmark series
//!   - `calculator`: orchestration into a [`RiskReport`]
//!   - `assessment`: volatility profile and risk-adjusted quality bands
//!   - `format`: display strings for the summary log
//! - **config**: YAML configuration with environment interpolation
//! - **telemetry**: `tracing` subscriber initialisation for hosts
//!
//! # Example
//!
//! ```rust,ignore
//! use risk_analytics::{RiskEngineInput, compute_risk_report};
//!
//! let input = RiskEngineInput::new(balance_curve, 0.045, 0.10);
//! let report = compute_risk_report(&input)?;
//! println!("Sharpe: {:.2}", report.volatility.sharpe_ratio);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Risk computation core - pure functions and streaming accumulators.
pub mod analytics;

/// Configuration loading and validation.
pub mod config;

/// Error types for the analytics core.
pub mod error;

/// Logging initialisation for host binaries.
pub mod telemetry;

pub use analytics::{
    AnalyticsPolicy, BalancePoint, DrawdownPoint, DrawdownTracker, MarketReturnPoint,
    MomentPolicy, ReportDiagnostics, ReturnPoint, ReturnSeriesBuilder, RiskAssessment,
    RiskEngineInput, RiskMetrics, RiskMetricsCalculator, RiskReport, RollingVolatilityPoint,
    RollingWindowVolatility, VarTailPolicy, VolatilityMetrics, compute_risk_report,
};
pub use error::{RiskError, RiskResult};
