//! Configuration for the risk report host.
//!
//! YAML with `${VAR}` / `${VAR:-default}` environment interpolation, parsed
//! into [`Config`] and validated before use.
//!
//! # Usage
//!
//! ```rust,ignore
//! use risk_analytics::config::load_config;
//!
//! let config = load_config(Some("config.yaml"))?;
//! let input = config.analytics.input_for(balance_curve, None);
//! ```

mod analytics;
mod observability;

use std::io::ErrorKind;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use analytics::AnalyticsConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};

use observability::{LOG_FORMATS, LOG_LEVELS};

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Report computation parameters.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Load configuration from a YAML file. Defaults to [`DEFAULT_CONFIG_PATH`].
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_string(),
        source,
    })?;
    load_config_from_string(&contents)
}

/// Load configuration, falling back to defaults when the file does not exist.
///
/// Any other read, parse or validation failure is still an error.
pub fn load_config_or_default(path: Option<&str>) -> Result<Config, ConfigError> {
    match load_config(path) {
        Err(ConfigError::ReadError { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(Config::default())
        }
        other => other,
    }
}

/// Load configuration from a YAML string.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Replace `${VAR}` and `${VAR:-default}` with environment values.
///
/// Unset or empty variables take the default, or the empty string without one.
#[allow(clippy::expect_used)] // Constant pattern
fn interpolate_env_vars(input: &str) -> String {
    static ENV_VAR_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match std::env::var(&caps[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let analytics = &config.analytics;

    if !(-1.0..=1.0).contains(&analytics.risk_free_rate) {
        return Err(ConfigError::ValidationError(
            "analytics.risk_free_rate must be between -1.0 and 1.0".to_string(),
        ));
    }

    if !(-1.0..=1.0).contains(&analytics.assumed_market_return) {
        return Err(ConfigError::ValidationError(
            "analytics.assumed_market_return must be between -1.0 and 1.0".to_string(),
        ));
    }

    if analytics.rolling_window < 2 {
        return Err(ConfigError::ValidationError(format!(
            "analytics.rolling_window must be at least 2, got {}",
            analytics.rolling_window
        )));
    }

    let logging = &config.observability.logging;
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{MomentPolicy, VarTailPolicy};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!((config.analytics.risk_free_rate - 0.045).abs() < f64::EPSILON);
        assert!((config.analytics.assumed_market_return - 0.10).abs() < f64::EPSILON);
        assert_eq!(config.analytics.rolling_window, 30);
        assert_eq!(config.analytics.policy.var_tail, VarTailPolicy::ClampToWorst);
        assert_eq!(config.observability.logging.level, "info");
        assert_eq!(config.observability.logging.format, "json");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.analytics.rolling_window, 30);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
analytics:
  risk_free_rate: 0.04
  assumed_market_return: 0.08
  rolling_window: 20
  policy:
    var_tail: strict
    moments: surface
    skip_weekends: false

observability:
  logging:
    level: "debug"
    format: "pretty"
    include_spans: false
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert!((config.analytics.risk_free_rate - 0.04).abs() < f64::EPSILON);
        assert!((config.analytics.assumed_market_return - 0.08).abs() < f64::EPSILON);
        assert_eq!(config.analytics.rolling_window, 20);
        assert_eq!(config.analytics.policy.var_tail, VarTailPolicy::Strict);
        assert_eq!(config.analytics.policy.moments, MomentPolicy::Surface);
        assert!(!config.analytics.policy.skip_weekends);
        assert_eq!(config.observability.logging.format, "pretty");
        assert!(!config.observability.logging.include_spans);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "rolling_window: ${RISK_ANALYTICS_TEST_NONEXISTENT_VAR:-45}";
        assert_eq!(interpolate_env_vars(input), "rolling_window: 45");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax
    fn test_env_var_uses_existing_value() {
        let result = interpolate_env_vars("path: ${PATH:-default}");
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${RISK_ANALYTICS_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "level: ");
    }

    #[test]
    fn test_interpolated_value_is_parsed() {
        let yaml = "analytics:\n  rolling_window: ${RISK_ANALYTICS_TEST_WINDOW_UNSET:-60}\n";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load interpolated config: {e}"),
        };
        assert_eq!(config.analytics.rolling_window, 60);
    }

    #[test]
    fn test_validation_invalid_risk_free_rate() {
        let yaml = "analytics:\n  risk_free_rate: 1.5\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid risk_free_rate");
        };
        assert!(err.to_string().contains("risk_free_rate"));
    }

    #[test]
    fn test_negative_risk_free_rate_accepted() {
        let yaml = "analytics:\n  risk_free_rate: -0.005\n";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("negative rate is valid: {e}"),
        };
        assert!((config.analytics.risk_free_rate + 0.005).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_window_too_small() {
        let yaml = "analytics:\n  rolling_window: 1\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for window of 1");
        };
        assert!(err.to_string().contains("rolling_window"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = "observability:\n  logging:\n    format: xml\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for unknown log format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_parse_error() {
        let yaml = "analytics:\n  rolling_window: [not, a, number]\n";
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = match tempfile::NamedTempFile::new() {
            Ok(f) => f,
            Err(e) => panic!("temp file: {e}"),
        };
        if let Err(e) = writeln!(file, "analytics:\n  risk_free_rate: 0.03") {
            panic!("write temp config: {e}");
        }

        let Some(path) = file.path().to_str() else {
            panic!("temp path is utf-8");
        };
        let config = match load_config(Some(path)) {
            Ok(c) => c,
            Err(e) => panic!("should load config file: {e}"),
        };
        assert!((config.analytics.risk_free_rate - 0.03).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("temp dir: {e}"),
        };
        let missing = dir.path().join("absent.yaml");
        let Some(path) = missing.to_str() else {
            panic!("temp path is utf-8");
        };

        assert!(matches!(
            load_config(Some(path)),
            Err(ConfigError::ReadError { .. })
        ));

        let config = match load_config_or_default(Some(path)) {
            Ok(c) => c,
            Err(e) => panic!("missing file falls back to defaults: {e}"),
        };
        assert_eq!(config.analytics.rolling_window, 30);
    }
}
