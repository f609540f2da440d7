//! Risk Report Binary
//!
//! Computes a risk report for a balance curve and prints it as JSON.
//!
//! # Usage
//!
//! ```bash
//! risk-report balances.json [market_returns.json]
//! ```
//!
//! `balances.json` holds `[{"date": "2025-03-10", "balance": "50000.00"}, ...]`;
//! the optional benchmark file holds `[{"date": "2025-03-10", "daily_return": 0.004}, ...]`.
//!
//! # Environment Variables
//!
//! - `RISK_ANALYTICS_CONFIG`: config file path (default: `config.yaml`; missing file uses defaults)
//! - `RUST_LOG`: log filter, overrides `observability.logging.level`

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;

use risk_analytics::analytics::{
    format_moment, format_optional_pct, format_optional_ratio, format_pct, format_ratio,
};
use risk_analytics::config::{DEFAULT_CONFIG_PATH, load_config_or_default};
use risk_analytics::telemetry::init_logging;
use risk_analytics::{
    BalancePoint, MarketReturnPoint, RiskAssessment, RiskReport, compute_risk_report,
};

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "RISK_ANALYTICS_CONFIG";

fn main() -> Result<()> {
    load_dotenv();

    let mut args = std::env::args().skip(1);
    let Some(balances_path) = args.next() else {
        bail!("usage: risk-report <balances.json> [market_returns.json]");
    };
    let market_path = args.next();

    let config_path =
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config_or_default(Some(&config_path))
        .with_context(|| format!("loading config from {config_path}"))?;
    init_logging(&config.observability.logging)?;

    tracing::info!(
        config = %config_path,
        balances = %balances_path,
        market = market_path.as_deref().unwrap_or("none"),
        "Starting risk report"
    );

    let balances: Vec<BalancePoint> = read_json(&balances_path)?;
    let market = market_path
        .as_deref()
        .map(read_json::<Vec<MarketReturnPoint>>)
        .transpose()?;

    let input = config.analytics.input_for(balances, market);
    let report = match compute_risk_report(&input) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(
                reason = e.reason(),
                malformed_input = e.is_malformed_input(),
                error = %e,
                "Risk report failed"
            );
            return Err(e).context("computing risk report");
        }
    };
    log_summary(&report);

    let json = serde_json::to_string_pretty(&report).context("serializing risk report")?;
    println!("{json}");
    Ok(())
}

/// Load .env from the working directory if present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn log_summary(report: &RiskReport) {
    let v = &report.volatility;
    let r = &report.risk;
    let assessment = RiskAssessment::from_report(report);

    tracing::info!(
        annualized_volatility = %format_pct(v.annualized_volatility),
        sharpe = %format_ratio(v.sharpe_ratio),
        sortino = %format_ratio(v.sortino_ratio),
        calmar = %format_ratio(v.calmar_ratio),
        max_drawdown = %format_pct(v.max_drawdown),
        var_95 = %format_pct(v.var_95),
        var_99 = %format_pct(v.var_99),
        skewness = %format_moment(v.skewness),
        excess_kurtosis = %format_moment(v.excess_kurtosis),
        annualized_return = %format_pct(r.annualized_return),
        beta = %format_optional_ratio(v.beta),
        alpha = %format_optional_pct(v.alpha),
        assessment = %assessment,
        "Risk report computed"
    );

    let d = &report.diagnostics;
    if d.var_tail_clamped || d.moments_substituted {
        tracing::warn!(
            var_tail_clamped = d.var_tail_clamped,
            moments_substituted = d.moments_substituted,
            "Report contains substituted values"
        );
    }
}
