//! Market-relative metrics against a benchmark return series.
//!
//! Beta, correlation and capture ratios need a real benchmark series aligned
//! by date with the portfolio returns. Without one these metrics are
//! unavailable, never synthesized.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::constants::HUNDRED;
use super::types::{MarketReturnPoint, ReturnPoint};
use crate::error::{RiskError, RiskResult};

/// Portfolio and benchmark returns on the same trading day.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AlignedReturn {
    portfolio: f64,
    market: f64,
}

/// Market-relative metrics for one report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketComparison {
    /// Dates present in both series.
    pub aligned_points: usize,
    /// `cov(p, m) / var(m)`; `None` if the benchmark never moves.
    pub beta: Option<f64>,
    /// Jensen's alpha in percent; `None` when beta is unavailable.
    pub alpha: Option<f64>,
    /// Pearson correlation; `None` if either series is constant.
    pub correlation: Option<f64>,
    /// Mean portfolio return over mean market return on up-market days, percent.
    pub upside_capture_percent: Option<f64>,
    /// Mean portfolio return over mean market return on down-market days, percent.
    pub downside_capture_percent: Option<f64>,
}

/// Inner-join portfolio and benchmark returns on date, in portfolio order.
///
/// Expects one benchmark value per date; the report calculator rejects
/// benchmark series whose dates are not strictly increasing.
#[must_use]
pub fn align_market_returns(
    returns: &[ReturnPoint],
    market: &[MarketReturnPoint],
) -> Vec<(NaiveDate, f64, f64)> {
    let by_date: HashMap<NaiveDate, f64> = market.iter().map(|m| (m.date, m.daily_return)).collect();

    returns
        .iter()
        .filter_map(|r| {
            by_date
                .get(&r.date)
                .map(|m| (r.date, r.daily_return, *m))
        })
        .collect()
}

impl MarketComparison {
    /// Compute market-relative metrics.
    ///
    /// `annualized_return`, `risk_free_rate` and `assumed_market_return` are
    /// annual decimals; alpha is
    /// `(R_p - (rf + beta * (R_m - rf))) * 100`.
    pub fn compute(
        returns: &[ReturnPoint],
        market: &[MarketReturnPoint],
        annualized_return: f64,
        risk_free_rate: f64,
        assumed_market_return: f64,
    ) -> RiskResult<Self> {
        let aligned: Vec<AlignedReturn> = align_market_returns(returns, market)
            .into_iter()
            .map(|(_, portfolio, market)| AlignedReturn { portfolio, market })
            .collect();

        if aligned.len() < 2 {
            return Err(RiskError::InsufficientData {
                required: 2,
                actual: aligned.len(),
                context: "market-aligned returns",
            });
        }

        let n = aligned.len() as f64;
        let mean_p = aligned.iter().map(|a| a.portfolio).sum::<f64>() / n;
        let mean_m = aligned.iter().map(|a| a.market).sum::<f64>() / n;

        let covariance = aligned
            .iter()
            .map(|a| (a.portfolio - mean_p) * (a.market - mean_m))
            .sum::<f64>()
            / n;
        let var_p = aligned
            .iter()
            .map(|a| (a.portfolio - mean_p).powi(2))
            .sum::<f64>()
            / n;
        let var_m = aligned
            .iter()
            .map(|a| (a.market - mean_m).powi(2))
            .sum::<f64>()
            / n;

        let beta = (var_m > 0.0).then(|| covariance / var_m);
        let alpha = beta.map(|b| {
            (annualized_return - (risk_free_rate + b * (assumed_market_return - risk_free_rate)))
                * HUNDRED
        });
        let correlation = (var_p > 0.0 && var_m > 0.0).then(|| covariance / (var_p * var_m).sqrt());

        Ok(Self {
            aligned_points: aligned.len(),
            beta,
            alpha,
            correlation,
            upside_capture_percent: capture(&aligned, |m| m > 0.0),
            downside_capture_percent: capture(&aligned, |m| m < 0.0),
        })
    }
}

fn capture(aligned: &[AlignedReturn], market_filter: impl Fn(f64) -> bool) -> Option<f64> {
    let days: Vec<&AlignedReturn> = aligned.iter().filter(|a| market_filter(a.market)).collect();
    if days.is_empty() {
        return None;
    }

    let count = days.len() as f64;
    let mean_p = days.iter().map(|a| a.portfolio).sum::<f64>() / count;
    let mean_m = days.iter().map(|a| a.market).sum::<f64>() / count;

    (mean_m != 0.0).then(|| mean_p / mean_m * HUNDRED)
}
