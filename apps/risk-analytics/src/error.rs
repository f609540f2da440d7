//! Error handling for the risk-analytics core.
//!
//! Every error is local to a single `compute_risk_report` call and means
//! "cannot compute a risk report for this input". Division-by-zero clamps on
//! Sharpe/Sortino/Calmar are not errors and never surface here.
//!
//! | Reason | Variant | Usage |
//! |--------|---------|-------|
//! | `INSUFFICIENT_DATA` | `InsufficientData` | Too few points for the statistic |
//! | `INVALID_BALANCE` | `InvalidBalance` | Zero or negative balance |
//! | `DEGENERATE_SAMPLE` | `DegenerateSample` | Zero variance where a moment divides by σ |
//! | `UNORDERED_DATES` | `UnorderedDates` | Balance dates not strictly increasing |
//! | `INVALID_PARAMETER` | `InvalidParameter` | Window size, rate or benchmark series invalid; return outside the decimal range |

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias for the analytics core.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors from risk report computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// Fewer points than the statistic requires.
    #[error("Insufficient data for {context}: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum number of points required.
        required: usize,
        /// Number of points supplied.
        actual: usize,
        /// Statistic or stage that needed the data.
        context: &'static str,
    },

    /// Non-positive balance in the balance curve.
    #[error("Invalid balance {balance} on {date}: balances must be positive")]
    InvalidBalance {
        /// Date of the offending point.
        date: NaiveDate,
        /// Offending balance.
        balance: Decimal,
    },

    /// Sample has zero variance, so a standardized moment is undefined.
    #[error("Degenerate sample for {context}: standard deviation is zero")]
    DegenerateSample {
        /// Statistic that required a non-zero standard deviation.
        context: &'static str,
    },

    /// Balance dates are not strictly increasing.
    #[error("Balance curve dates must be strictly increasing (violation at index {index})")]
    UnorderedDates {
        /// Index of the first point whose date does not follow its predecessor.
        index: usize,
    },

    /// A scalar parameter is out of range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Error message.
        message: String,
    },
}

impl RiskError {
    /// Stable reason string for display and structured logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "INSUFFICIENT_DATA",
            Self::InvalidBalance { .. } => "INVALID_BALANCE",
            Self::DegenerateSample { .. } => "DEGENERATE_SAMPLE",
            Self::UnorderedDates { .. } => "UNORDERED_DATES",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }

    /// Whether the error comes from malformed input rather than a
    /// well-formed but statistically degenerate sample.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidBalance { .. } | Self::UnorderedDates { .. } | Self::InvalidParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        let err = RiskError::InsufficientData {
            required: 2,
            actual: 1,
            context: "balance curve",
        };
        assert_eq!(err.reason(), "INSUFFICIENT_DATA");
        assert!(!err.is_malformed_input());

        let err = RiskError::UnorderedDates { index: 3 };
        assert_eq!(err.reason(), "UNORDERED_DATES");
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_display_includes_context() {
        let Some(date) = NaiveDate::from_ymd_opt(2025, 3, 11) else {
            panic!("valid date");
        };
        let err = RiskError::InvalidBalance {
            date,
            balance: Decimal::ZERO,
        };
        let msg = err.to_string();
        assert!(msg.contains("2025-03-11"));
        assert!(msg.contains("must be positive"));

        let err = RiskError::DegenerateSample {
            context: "skewness",
        };
        assert!(err.to_string().contains("skewness"));
    }
}
