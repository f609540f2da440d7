//! Qualitative risk assessment of a report.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::RiskReport;

/// Annualized volatility (percent) below which risk is low.
const LOW_VOLATILITY_CEILING: f64 = 15.0;

/// Annualized volatility (percent) below which risk is moderate.
const MODERATE_VOLATILITY_CEILING: f64 = 25.0;

/// Sharpe ratio above which risk-adjusted returns are excellent.
const EXCELLENT_SHARPE_FLOOR: f64 = 1.5;

/// Sharpe ratio above which risk-adjusted returns are good.
const GOOD_SHARPE_FLOOR: f64 = 1.0;

/// Volatility bucket for the annualized volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityProfile {
    /// Under 15% annualized.
    Low,
    /// 15% up to 25% annualized.
    Moderate,
    /// 25% annualized or more.
    High,
}

impl VolatilityProfile {
    /// Classify an annualized volatility in percent.
    #[must_use]
    pub fn classify(annualized_volatility_percent: f64) -> Self {
        if annualized_volatility_percent < LOW_VOLATILITY_CEILING {
            Self::Low
        } else if annualized_volatility_percent < MODERATE_VOLATILITY_CEILING {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

impl fmt::Display for VolatilityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low Risk"),
            Self::Moderate => write!(f, "Moderate Risk"),
            Self::High => write!(f, "High Risk"),
        }
    }
}

/// Risk-adjusted return quality from the Sharpe ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceQuality {
    /// Sharpe above 1.5.
    Excellent,
    /// Sharpe above 1.0.
    Good,
    /// Everything else.
    Poor,
}

impl PerformanceQuality {
    /// Classify a Sharpe ratio.
    #[must_use]
    pub fn classify(sharpe_ratio: f64) -> Self {
        if sharpe_ratio > EXCELLENT_SHARPE_FLOOR {
            Self::Excellent
        } else if sharpe_ratio > GOOD_SHARPE_FLOOR {
            Self::Good
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for PerformanceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// Summary classification shown next to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Volatility bucket.
    pub volatility: VolatilityProfile,
    /// Risk-adjusted return quality.
    pub performance: PerformanceQuality,
}

impl RiskAssessment {
    /// Assess a computed report.
    #[must_use]
    pub fn from_report(report: &RiskReport) -> Self {
        Self {
            volatility: VolatilityProfile::classify(report.volatility.annualized_volatility),
            performance: PerformanceQuality::classify(report.volatility.sharpe_ratio),
        }
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} Risk-Adjusted Returns", self.volatility, self.performance)
    }
}
