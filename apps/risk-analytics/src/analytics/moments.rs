//! Moment statistics over daily return samples.
//!
//! Population convention (divide by `n`) throughout, so daily volatility,
//! skewness and kurtosis share the same basis.

use super::constants::DEGENERATE_TOLERANCE;
use crate::error::{RiskError, RiskResult};

const MIN_SAMPLE: usize = 2;

fn require_sample(values: &[f64], context: &'static str) -> RiskResult<()> {
    if values.len() < MIN_SAMPLE {
        return Err(RiskError::InsufficientData {
            required: MIN_SAMPLE,
            actual: values.len(),
            context,
        });
    }
    Ok(())
}

fn raw_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn raw_variance(values: &[f64], avg: f64) -> f64 {
    values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64
}

/// Calculate the mean of a sample.
pub fn mean(values: &[f64]) -> RiskResult<f64> {
    require_sample(values, "mean")?;
    Ok(raw_mean(values))
}

/// Calculate the population variance of a sample.
pub fn population_variance(values: &[f64]) -> RiskResult<f64> {
    require_sample(values, "variance")?;
    Ok(raw_variance(values, raw_mean(values)))
}

/// Calculate the population standard deviation of a sample.
pub fn population_std_dev(values: &[f64]) -> RiskResult<f64> {
    population_variance(values).map(f64::sqrt)
}

/// Whether σ is zero, or only rounding residue of a constant sample with mean `avg`.
pub(crate) fn is_degenerate(sigma: f64, avg: f64) -> bool {
    sigma == 0.0 || sigma <= DEGENERATE_TOLERANCE * avg.abs()
}

/// Mean and σ for a standardized moment, rejecting zero-variance samples.
fn standardize(values: &[f64], context: &'static str) -> RiskResult<(f64, f64)> {
    require_sample(values, context)?;
    let avg = raw_mean(values);
    let sigma = raw_variance(values, avg).sqrt();

    if is_degenerate(sigma, avg) {
        return Err(RiskError::DegenerateSample { context });
    }
    Ok((avg, sigma))
}

/// Skewness: `mean(((x - μ) / σ)^3)`.
pub fn skewness(values: &[f64]) -> RiskResult<f64> {
    let (avg, sigma) = standardize(values, "skewness")?;
    let sum: f64 = values.iter().map(|v| ((v - avg) / sigma).powi(3)).sum();
    Ok(sum / values.len() as f64)
}

/// Excess kurtosis: `mean(((x - μ) / σ)^4) - 3`.
pub fn excess_kurtosis(values: &[f64]) -> RiskResult<f64> {
    let (avg, sigma) = standardize(values, "excess kurtosis")?;
    let sum: f64 = values.iter().map(|v| ((v - avg) / sigma).powi(4)).sum();
    Ok(sum / values.len() as f64 - 3.0)
}
