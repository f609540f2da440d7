//! Constants for risk metric calculations.

use rust_decimal::Decimal;

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default trailing window for rolling volatility (observations).
pub const DEFAULT_ROLLING_WINDOW: usize = 30;

/// Multiplier from fraction to percent.
pub const HUNDRED: f64 = 100.0;

/// Percent multiplier for Decimal arithmetic.
pub const HUNDRED_DECIMAL: Decimal = Decimal::ONE_HUNDRED;

/// Basis points in one whole (100%).
pub const BPS_PER_UNIT: usize = 10_000;

/// σ at or below this fraction of |μ| is floating-point residue of a constant sample.
pub const DEGENERATE_TOLERANCE: f64 = 1e-10;

/// Annualization factor for daily statistics: `sqrt(252)`.
#[must_use]
pub fn annualization_factor() -> f64 {
    TRADING_DAYS_PER_YEAR.sqrt()
}
