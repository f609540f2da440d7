//! Trailing-window annualized volatility.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::constants::{HUNDRED, annualization_factor};
use super::moments::population_std_dev;
use super::types::{ReturnPoint, RollingVolatilityPoint};
use crate::error::{RiskError, RiskResult};

/// Snapshot of a rolling volatility accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingVolatilityState {
    /// Configured window size.
    pub window: usize,
    /// Returns currently buffered (at most `window`).
    pub filled: usize,
    /// Returns consumed in total.
    pub observations: usize,
    /// Last emitted point, if the window has filled.
    pub last: Option<RollingVolatilityPoint>,
}

/// Streaming rolling-window volatility.
///
/// Keeps the last `window` daily returns. Once full, every step emits the
/// population standard deviation of the window, annualized with `sqrt(252)`
/// and expressed in percent, dated at the window's newest return. The window
/// is recomputed in O(window) per step.
#[derive(Debug, Clone)]
pub struct RollingWindowVolatility {
    window: usize,
    buffer: VecDeque<f64>,
    observations: usize,
    last: Option<RollingVolatilityPoint>,
}

impl RollingWindowVolatility {
    /// Create an accumulator. The window must hold at least two returns.
    pub fn new(window: usize) -> RiskResult<Self> {
        if window < 2 {
            return Err(RiskError::InvalidParameter {
                message: format!("rolling window must be at least 2, got {window}"),
            });
        }
        Ok(Self {
            window,
            buffer: VecDeque::with_capacity(window),
            observations: 0,
            last: None,
        })
    }

    /// Consume one return; emits once the window is full.
    pub fn step(&mut self, point: &ReturnPoint) -> Option<RollingVolatilityPoint> {
        self.observations += 1;
        if self.buffer.len() == self.window {
            self.buffer.pop_front();
        }
        self.buffer.push_back(point.daily_return);

        if self.buffer.len() < self.window {
            return None;
        }

        let window: Vec<f64> = self.buffer.iter().copied().collect();
        let daily = population_std_dev(&window).ok()?;
        let emitted = RollingVolatilityPoint {
            date: point.date,
            annualized_volatility_percent: daily * annualization_factor() * HUNDRED,
        };
        self.last = Some(emitted);
        Some(emitted)
    }

    /// Snapshot of the accumulated state.
    #[must_use]
    pub fn snapshot(&self) -> RollingVolatilityState {
        RollingVolatilityState {
            window: self.window,
            filled: self.buffer.len(),
            observations: self.observations,
            last: self.last,
        }
    }

    /// Run a fresh accumulator over a whole return series.
    pub fn series(returns: &[ReturnPoint], window: usize) -> RiskResult<Vec<RollingVolatilityPoint>> {
        let mut rolling = Self::new(window)?;
        Ok(returns.iter().filter_map(|r| rolling.step(r)).collect())
    }
}
