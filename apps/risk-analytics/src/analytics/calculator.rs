//! Risk report calculator.

use tracing::{debug, warn};

use super::constants::{HUNDRED, TRADING_DAYS_PER_YEAR, annualization_factor};
use super::drawdown::DrawdownTracker;
use super::market::MarketComparison;
use super::moments::{excess_kurtosis, is_degenerate, mean, population_std_dev, skewness};
use super::returns::{ReturnSeriesBuilder, returns_from_trading_days};
use super::rolling::RollingWindowVolatility;
use super::types::{
    MomentPolicy, ReportDiagnostics, RiskEngineInput, RiskMetrics, RiskReport, VolatilityMetrics,
};
use super::var::{VarConfidence, var_from_sorted};
use crate::error::{RiskError, RiskResult};

/// Compute a full risk report for one input.
///
/// Pure function: no state survives the call, so the same input always
/// yields the same report.
pub fn compute_risk_report(input: &RiskEngineInput) -> RiskResult<RiskReport> {
    RiskMetricsCalculator::new(input).calculate()
}

/// Orchestrates the return builder, moment statistics, drawdown and rolling
/// trackers, VaR and market comparison into a [`RiskReport`].
#[derive(Debug, Clone, Copy)]
pub struct RiskMetricsCalculator<'a> {
    input: &'a RiskEngineInput,
}

impl<'a> RiskMetricsCalculator<'a> {
    /// Create a calculator over an input.
    #[must_use]
    pub const fn new(input: &'a RiskEngineInput) -> Self {
        Self { input }
    }

    /// Calculate all risk metrics.
    pub fn calculate(&self) -> RiskResult<RiskReport> {
        let input = self.input;
        let policy = input.policy;
        self.validate_parameters()?;
        let mut rolling = RollingWindowVolatility::new(input.rolling_window_size)?;
        let mut diagnostics = ReportDiagnostics::default();

        let trading = ReturnSeriesBuilder::new()
            .skip_weekends(policy.skip_weekends)
            .trading_days(&input.balance_curve)?;
        diagnostics.weekend_points_dropped = input.balance_curve.len() - trading.len();
        let returns = returns_from_trading_days(&trading)?;
        let values: Vec<f64> = returns.iter().map(|r| r.daily_return).collect();

        let avg = mean(&values)?;
        let daily_volatility = snap_residue(population_std_dev(&values)?, avg);
        let annualized_volatility = daily_volatility * annualization_factor();
        let annualized_return = avg * TRADING_DAYS_PER_YEAR;
        let excess_return = annualized_return - input.risk_free_rate_annual;

        let sharpe_ratio = ratio_or_zero(excess_return, annualized_volatility);

        let (drawdowns, drawdown_state) = DrawdownTracker::track(&trading);
        let max_drawdown = drawdown_state.max_drawdown_percent;
        let calmar_ratio = ratio_or_zero(annualized_return, (max_drawdown / HUNDRED).abs());

        let downside_deviation = downside_deviation(&values) * annualization_factor();
        let sortino_ratio = ratio_or_zero(excess_return, downside_deviation);

        let (skew, kurtosis) = self.standardized_moments(&values, &mut diagnostics)?;
        let (var_95, var_99) = self.value_at_risk(&values, &mut diagnostics)?;

        let market = match &input.market_returns {
            Some(series) => {
                diagnostics.market_metrics_available = true;
                Some(MarketComparison::compute(
                    &returns,
                    series,
                    annualized_return,
                    input.risk_free_rate_annual,
                    input.assumed_market_return_annual,
                )?)
            }
            None => None,
        };

        let rolling_volatility = returns.iter().filter_map(|r| rolling.step(r)).collect();

        let report = RiskReport {
            volatility: VolatilityMetrics {
                daily_volatility: daily_volatility * HUNDRED,
                annualized_volatility: annualized_volatility * HUNDRED,
                sharpe_ratio,
                max_drawdown,
                calmar_ratio,
                sortino_ratio,
                skewness: skew,
                excess_kurtosis: kurtosis,
                var_95,
                var_99,
                beta: market.and_then(|m| m.beta),
                alpha: market.and_then(|m| m.alpha),
            },
            risk: RiskMetrics {
                annualized_return: annualized_return * HUNDRED,
                annualized_std_dev: annualized_volatility * HUNDRED,
                annualized_downside_deviation: downside_deviation * HUNDRED,
                upside_capture_percent: market.and_then(|m| m.upside_capture_percent),
                downside_capture_percent: market.and_then(|m| m.downside_capture_percent),
                correlation_to_market: market.and_then(|m| m.correlation),
            },
            rolling_volatility,
            drawdowns,
            diagnostics,
        };

        debug!(
            returns = values.len(),
            annualized_volatility = report.volatility.annualized_volatility,
            sharpe = report.volatility.sharpe_ratio,
            max_drawdown = report.volatility.max_drawdown,
            rolling_points = report.rolling_volatility.len(),
            "Computed risk report"
        );

        Ok(report)
    }

    fn validate_parameters(&self) -> RiskResult<()> {
        let input = self.input;
        if !input.risk_free_rate_annual.is_finite() {
            return Err(RiskError::InvalidParameter {
                message: "risk_free_rate_annual must be finite".to_string(),
            });
        }
        if !input.assumed_market_return_annual.is_finite() {
            return Err(RiskError::InvalidParameter {
                message: "assumed_market_return_annual must be finite".to_string(),
            });
        }
        if let Some(series) = &input.market_returns {
            if let Some(bad) = series.iter().find(|m| !m.daily_return.is_finite()) {
                return Err(RiskError::InvalidParameter {
                    message: format!("market return on {} is not finite", bad.date),
                });
            }
            if let Some(idx) = (1..series.len()).find(|&i| series[i].date <= series[i - 1].date) {
                return Err(RiskError::InvalidParameter {
                    message: format!(
                        "market return dates must be strictly increasing (violation at index {idx})"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Skewness and excess kurtosis, applying the degenerate-sample policy.
    fn standardized_moments(
        &self,
        values: &[f64],
        diagnostics: &mut ReportDiagnostics,
    ) -> RiskResult<(f64, f64)> {
        let moments = skewness(values).and_then(|s| excess_kurtosis(values).map(|k| (s, k)));

        match moments {
            Ok(pair) => Ok(pair),
            Err(RiskError::DegenerateSample { context })
                if self.input.policy.moments == MomentPolicy::SubstituteZero =>
            {
                warn!(statistic = context, "Zero-variance returns, reporting skewness and kurtosis as 0");
                diagnostics.moments_substituted = true;
                Ok((0.0, 0.0))
            }
            Err(e) => Err(e),
        }
    }

    /// 95% and 99% historical VaR from one sort of the sample.
    fn value_at_risk(
        &self,
        values: &[f64],
        diagnostics: &mut ReportDiagnostics,
    ) -> RiskResult<(f64, f64)> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let policy = self.input.policy.var_tail;
        let var_95 = var_from_sorted(&sorted, VarConfidence::Pct95, policy)?;
        let var_99 = var_from_sorted(&sorted, VarConfidence::Pct99, policy)?;

        if var_95.clamped || var_99.clamped {
            warn!(
                returns = sorted.len(),
                var_95_clamped = var_95.clamped,
                var_99_clamped = var_99.clamped,
                "VaR tail has no observation, using worst observed return"
            );
            diagnostics.var_tail_clamped = true;
        }

        Ok((var_95.var_percent, var_99.var_percent))
    }
}

/// Division with the zero-denominator clamp used by Sharpe, Sortino and Calmar.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// σ that is only floating-point residue of a constant sample counts as 0.
fn snap_residue(sigma: f64, avg: f64) -> f64 {
    if is_degenerate(sigma, avg) { 0.0 } else { sigma }
}

/// Daily population std-dev of the negative returns; 0 with fewer than two.
fn downside_deviation(values: &[f64]) -> f64 {
    let downside: Vec<f64> = values.iter().copied().filter(|r| *r < 0.0).collect();
    if downside.len() < 2 {
        return 0.0;
    }

    let avg = downside.iter().sum::<f64>() / downside.len() as f64;
    population_std_dev(&downside).map_or(0.0, |sigma| snap_residue(sigma, avg))
}
