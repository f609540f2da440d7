//! Running-peak drawdown tracking over a balance curve.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::constants::HUNDRED_DECIMAL;
use super::types::{BalancePoint, DrawdownPoint};

/// Accumulated drawdown state after some number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownState {
    /// Highest balance observed so far (`None` before the first step).
    pub peak: Option<Decimal>,
    /// Date the current peak was set.
    pub peak_date: Option<NaiveDate>,
    /// Most negative drawdown percent observed (0 if none).
    pub max_drawdown_percent: f64,
    /// Points consumed.
    pub observations: usize,
}

/// Streaming drawdown tracker.
///
/// Drawdown is `(balance - peak) / peak * 100`, so it is always `<= 0`. The
/// peak starts at the first balance and never decreases. One output point is
/// emitted per input point, including a `0` for the first.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use risk_analytics::{BalancePoint, DrawdownTracker};
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let mut tracker = DrawdownTracker::new();
/// tracker.step(&BalancePoint::new(day, Decimal::new(100, 0)));
/// let point = tracker.step(&BalancePoint::new(day.succ_opt().unwrap(), Decimal::new(90, 0)));
/// assert!((point.drawdown_percent + 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DrawdownTracker {
    peak: Option<Decimal>,
    peak_date: Option<NaiveDate>,
    max_drawdown_percent: f64,
    observations: usize,
}

impl DrawdownTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one balance point and emit its drawdown.
    pub fn step(&mut self, point: &BalancePoint) -> DrawdownPoint {
        self.observations += 1;

        let peak = match self.peak {
            Some(peak) if peak >= point.balance => peak,
            _ => {
                self.peak = Some(point.balance);
                self.peak_date = Some(point.date);
                point.balance
            }
        };

        let drawdown_percent = if peak > Decimal::ZERO && point.balance < peak {
            ((point.balance - peak) / peak * HUNDRED_DECIMAL)
                .to_f64()
                .unwrap_or(0.0)
        } else {
            0.0
        };

        self.max_drawdown_percent = self.max_drawdown_percent.min(drawdown_percent);

        DrawdownPoint {
            date: point.date,
            drawdown_percent,
        }
    }

    /// Snapshot of the accumulated state.
    #[must_use]
    pub const fn snapshot(&self) -> DrawdownState {
        DrawdownState {
            peak: self.peak,
            peak_date: self.peak_date,
            max_drawdown_percent: self.max_drawdown_percent,
            observations: self.observations,
        }
    }

    /// Maximum drawdown so far (percent, <= 0).
    #[must_use]
    pub const fn max_drawdown_percent(&self) -> f64 {
        self.max_drawdown_percent
    }

    /// Run a fresh tracker over a whole curve.
    #[must_use]
    pub fn track(curve: &[BalancePoint]) -> (Vec<DrawdownPoint>, DrawdownState) {
        let mut tracker = Self::new();
        let points = curve.iter().map(|p| tracker.step(p)).collect();
        (points, tracker.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(balances: &[i64]) -> Vec<BalancePoint> {
        let Some(start) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
            panic!("valid start date");
        };
        balances
            .iter()
            .zip(start.iter_days())
            .map(|(b, d)| BalancePoint::new(d, Decimal::new(*b, 0)))
            .collect()
    }

    #[test]
    fn test_first_point_is_zero() {
        let (points, state) = DrawdownTracker::track(&curve(&[100]));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].drawdown_percent, 0.0);
        assert_eq!(state.peak, Some(Decimal::new(100, 0)));
        assert_eq!(state.observations, 1);
    }

    #[test]
    fn test_drawdown_calculation() {
        let (points, state) =
            DrawdownTracker::track(&curve(&[100_000, 110_000, 105_000, 108_000, 95_000, 100_000]));

        let expected: Vec<f64> = [0.0, 0.0, -5_000.0, -2_000.0, -15_000.0, -10_000.0]
            .iter()
            .map(|d| d / 110_000.0 * 100.0)
            .collect();

        for (point, want) in points.iter().zip(&expected) {
            assert!((point.drawdown_percent - want).abs() < 1e-9);
        }
        assert_eq!(state.peak, Some(Decimal::new(110_000, 0)));
        assert!((state.max_drawdown_percent - expected[4]).abs() < 1e-9);
    }

    #[test]
    fn test_peak_is_monotonic_and_resets_drawdown() {
        let data = curve(&[100, 102, 101, 105, 103]);
        let mut tracker = DrawdownTracker::new();
        let mut last_peak = Decimal::ZERO;

        for p in &data {
            let out = tracker.step(p);
            assert!(out.drawdown_percent <= 0.0);
            let Some(peak) = tracker.snapshot().peak else {
                panic!("peak set after first step");
            };
            assert!(peak >= last_peak);
            last_peak = peak;
        }

        let state = tracker.snapshot();
        assert_eq!(state.peak, Some(Decimal::new(105, 0)));
        assert_eq!(state.peak_date, Some(data[3].date));
        // 103 vs 105 is deeper than 101 vs 102
        assert!((state.max_drawdown_percent - (-200.0 / 105.0)).abs() < 1e-9);
    }

    #[test]
    fn test_constant_curve_has_no_drawdown() {
        let (points, state) = DrawdownTracker::track(&curve(&[50_000; 8]));
        assert!(points.iter().all(|p| p.drawdown_percent == 0.0));
        assert_eq!(state.max_drawdown_percent, 0.0);
    }
}
