//! Historical-simulation Value-at-Risk.
//!
//! Percentile lookup on the sorted empirical return distribution, not a
//! parametric estimate: `VaR_p = sorted[floor(n * p)] * 100`.

use serde::{Deserialize, Serialize};

use super::constants::{BPS_PER_UNIT, HUNDRED};
use super::types::VarTailPolicy;
use crate::error::{RiskError, RiskResult};

/// Supported VaR confidence levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarConfidence {
    /// 95% confidence (5% left tail).
    Pct95,
    /// 99% confidence (1% left tail).
    Pct99,
}

impl VarConfidence {
    /// Left-tail probability in basis points.
    #[must_use]
    pub const fn tail_bps(self) -> usize {
        match self {
            Self::Pct95 => 500,
            Self::Pct99 => 100,
        }
    }

    /// Minimum sample size with at least one tail observation.
    #[must_use]
    pub const fn min_sample(self) -> usize {
        BPS_PER_UNIT.div_ceil(self.tail_bps())
    }

    const fn context(self) -> &'static str {
        match self {
            Self::Pct95 => "95% VaR",
            Self::Pct99 => "99% VaR",
        }
    }
}

/// Historical VaR result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarEstimate {
    /// VaR as a percent daily return (negative for a loss).
    pub var_percent: f64,
    /// Sorted index used.
    pub index: usize,
    /// Whether the index was clamped to the worst observation.
    pub clamped: bool,
}

/// Compute historical VaR from an ascending-sorted return sample.
pub fn var_from_sorted(
    sorted: &[f64],
    confidence: VarConfidence,
    policy: VarTailPolicy,
) -> RiskResult<VarEstimate> {
    let n = sorted.len();
    if n == 0 {
        return Err(RiskError::InsufficientData {
            required: confidence.min_sample(),
            actual: 0,
            context: confidence.context(),
        });
    }

    // floor(n * p) with p in basis points, exact in integers
    let index = n * confidence.tail_bps() / BPS_PER_UNIT;

    let (index, clamped) = if index >= 1 {
        (index, false)
    } else {
        match policy {
            VarTailPolicy::Strict => {
                return Err(RiskError::InsufficientData {
                    required: confidence.min_sample(),
                    actual: n,
                    context: confidence.context(),
                });
            }
            VarTailPolicy::ClampToWorst => (0, true),
        }
    };

    Ok(VarEstimate {
        var_percent: sorted[index] * HUNDRED,
        index,
        clamped,
    })
}

/// Sort a return sample ascending and compute historical VaR.
pub fn historical_var(
    returns: &[f64],
    confidence: VarConfidence,
    policy: VarTailPolicy,
) -> RiskResult<VarEstimate> {
    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);
    var_from_sorted(&sorted, confidence, policy)
}
