//! Formatting utilities for risk metrics display.
//!
//! Report fields are already expressed in percent, so these only round.

/// Format a percent value with 2 decimal places and a `%` suffix.
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// Format a ratio with 2 decimal places.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a skewness or kurtosis value with 3 decimal places.
#[must_use]
pub fn format_moment(value: f64) -> String {
    format!("{value:.3}")
}

/// Format an optional percent value.
#[must_use]
pub fn format_optional_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_pct)
}

/// Format an optional ratio.
#[must_use]
pub fn format_optional_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_pct(15.234), "15.23%");
        assert_eq!(format_pct(-1.9047), "-1.90%");
        assert_eq!(format_ratio(2.3512), "2.35");
        assert_eq!(format_moment(-0.12345), "-0.123");
    }

    #[test]
    fn test_optional_values() {
        assert_eq!(format_optional_pct(Some(200.0)), "200.00%");
        assert_eq!(format_optional_pct(None), "N/A");
        assert_eq!(format_optional_ratio(Some(0.5)), "0.50");
        assert_eq!(format_optional_ratio(None), "N/A");
    }
}
