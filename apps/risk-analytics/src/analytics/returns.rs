//! Daily return series construction from a balance curve.

use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use super::types::{BalancePoint, ReturnPoint};
use crate::error::{RiskError, RiskResult};

/// Builds the daily-return series from a chronologically ordered balance curve.
///
/// Validation happens on the full input before any filtering: every balance
/// must be positive and dates must be strictly increasing.
#[derive(Debug, Clone, Copy)]
pub struct ReturnSeriesBuilder {
    skip_weekends: bool,
}

impl Default for ReturnSeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnSeriesBuilder {
    /// Create a builder that drops Saturday/Sunday points.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            skip_weekends: true,
        }
    }

    /// Enable or disable weekend filtering.
    #[must_use]
    pub const fn skip_weekends(mut self, skip: bool) -> Self {
        self.skip_weekends = skip;
        self
    }

    /// Validate the curve and return the trading-day points.
    pub fn trading_days(&self, curve: &[BalancePoint]) -> RiskResult<Vec<BalancePoint>> {
        validate_curve(curve)?;

        let trading: Vec<BalancePoint> = curve
            .iter()
            .filter(|p| !self.skip_weekends || !is_weekend(p.date))
            .copied()
            .collect();

        let dropped = curve.len() - trading.len();
        if dropped > 0 {
            debug!(dropped, remaining = trading.len(), "Dropped weekend balance points");
        }

        Ok(trading)
    }

    /// Build the return series: `balance[i] / balance[i-1] - 1` per adjacent pair.
    pub fn build(&self, curve: &[BalancePoint]) -> RiskResult<Vec<ReturnPoint>> {
        let trading = self.trading_days(curve)?;
        returns_from_trading_days(&trading)
    }
}

/// Difference an already validated, trading-day-only balance curve.
pub(crate) fn returns_from_trading_days(trading: &[BalancePoint]) -> RiskResult<Vec<ReturnPoint>> {
    if trading.len() < 2 {
        return Err(RiskError::InsufficientData {
            required: 2,
            actual: trading.len(),
            context: "balance curve",
        });
    }

    trading
        .windows(2)
        .map(|pair| -> RiskResult<ReturnPoint> {
            let (prev, curr) = (pair[0], pair[1]);
            Ok(ReturnPoint {
                date: curr.date,
                daily_return: daily_return(&prev, &curr)?,
                balance: curr.balance,
            })
        })
        .collect()
}

fn validate_curve(curve: &[BalancePoint]) -> RiskResult<()> {
    for (idx, point) in curve.iter().enumerate() {
        if point.balance <= Decimal::ZERO {
            return Err(RiskError::InvalidBalance {
                date: point.date,
                balance: point.balance,
            });
        }
        if idx > 0 && point.date <= curve[idx - 1].date {
            return Err(RiskError::UnorderedDates { index: idx });
        }
    }
    Ok(())
}

/// `curr / prev - 1`; a ratio beyond the `Decimal` range is an error.
fn daily_return(prev: &BalancePoint, curr: &BalancePoint) -> RiskResult<f64> {
    curr.balance
        .checked_div(prev.balance)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .map(|r| r.to_f64().unwrap_or(0.0))
        .ok_or_else(|| RiskError::InvalidParameter {
            message: format!(
                "return on {} from {} to {} overflows the decimal range",
                curr.date, prev.balance, curr.balance
            ),
        })
}

fn is_weekend(date: chrono::NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("invalid test date {y}-{m}-{d}");
        };
        date
    }

    fn point(d: NaiveDate, balance: i64) -> BalancePoint {
        BalancePoint::new(d, Decimal::new(balance, 0))
    }

    #[test]
    fn test_build_returns() {
        // 2025-03-10 is a Monday
        let curve = vec![
            point(date(2025, 3, 10), 100),
            point(date(2025, 3, 11), 102),
            point(date(2025, 3, 12), 101),
        ];

        let Ok(returns) = ReturnSeriesBuilder::new().build(&curve) else {
            panic!("returns should build");
        };
        assert_eq!(returns.len(), 2);
        assert_eq!(returns[0].date, date(2025, 3, 11));
        assert!((returns[0].daily_return - 0.02).abs() < 1e-15);
        assert!((returns[1].daily_return - (101.0 / 102.0 - 1.0)).abs() < 1e-15);
        assert_eq!(returns[1].balance, Decimal::new(101, 0));
    }

    #[test]
    fn test_weekends_dropped_before_differencing() {
        // Fri, Sat, Sun, Mon
        let curve = vec![
            point(date(2025, 3, 14), 100),
            point(date(2025, 3, 15), 500),
            point(date(2025, 3, 16), 1),
            point(date(2025, 3, 17), 110),
        ];

        let Ok(returns) = ReturnSeriesBuilder::new().build(&curve) else {
            panic!("returns should build");
        };
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].date, date(2025, 3, 17));
        assert!((returns[0].daily_return - 0.10).abs() < 1e-15);

        let Ok(raw) = ReturnSeriesBuilder::new().skip_weekends(false).build(&curve) else {
            panic!("returns should build without filtering");
        };
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_insufficient_points() {
        let curve = vec![point(date(2025, 3, 10), 100)];
        let err = ReturnSeriesBuilder::new().build(&curve);
        assert!(matches!(
            err,
            Err(RiskError::InsufficientData {
                required: 2,
                actual: 1,
                ..
            })
        ));

        // Only weekend days besides one trading day
        let curve = vec![point(date(2025, 3, 14), 100), point(date(2025, 3, 15), 101)];
        assert!(matches!(
            ReturnSeriesBuilder::new().build(&curve),
            Err(RiskError::InsufficientData { actual: 1, .. })
        ));
    }

    #[test]
    fn test_non_positive_balance_rejected() {
        let curve = vec![
            point(date(2025, 3, 10), 100),
            point(date(2025, 3, 11), 0),
            point(date(2025, 3, 12), 101),
        ];
        assert_eq!(
            ReturnSeriesBuilder::new().build(&curve),
            Err(RiskError::InvalidBalance {
                date: date(2025, 3, 11),
                balance: Decimal::ZERO,
            })
        );

        // Negative balance on a weekend is still rejected
        let curve = vec![
            point(date(2025, 3, 14), 100),
            point(date(2025, 3, 15), -5),
            point(date(2025, 3, 17), 101),
        ];
        assert!(matches!(
            ReturnSeriesBuilder::new().build(&curve),
            Err(RiskError::InvalidBalance { .. })
        ));
    }

    #[test]
    fn test_overflowing_ratio_is_an_error() {
        let curve = vec![
            BalancePoint::new(date(2025, 3, 10), Decimal::new(1, 20)),
            BalancePoint::new(date(2025, 3, 11), Decimal::MAX),
            BalancePoint::new(date(2025, 3, 12), Decimal::MAX),
        ];

        let Err(err) = ReturnSeriesBuilder::new().build(&curve) else {
            panic!("ratio of 1e48 cannot be represented");
        };
        assert_eq!(err.reason(), "INVALID_PARAMETER");
        assert!(err.to_string().contains("2025-03-11"));
    }

    #[test]
    fn test_unordered_dates_rejected() {
        let curve = vec![
            point(date(2025, 3, 11), 100),
            point(date(2025, 3, 10), 101),
        ];
        assert_eq!(
            ReturnSeriesBuilder::new().build(&curve),
            Err(RiskError::UnorderedDates { index: 1 })
        );

        let duplicate = vec![
            point(date(2025, 3, 10), 100),
            point(date(2025, 3, 10), 101),
        ];
        assert!(ReturnSeriesBuilder::new().build(&duplicate).is_err());
    }
}
