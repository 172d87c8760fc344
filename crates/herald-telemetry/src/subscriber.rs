use serde::{Deserialize, Serialize};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `herald_events=debug`.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub json_output: bool,

    #[serde(default)]
    pub service_name: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json_output: false,
            service_name: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn build_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(default_level()))
}

/// Installs the global subscriber. Fails if one is already set.
pub fn try_init_subscriber(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let filter = build_filter(config);

    let result = if config.json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result?;

    if let Some(service) = &config.service_name {
        tracing::debug!("Telemetry initialized for {}", service);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_output);
        assert!(config.service_name.is_none());
    }

    #[test]
    fn test_config_from_sparse_json() {
        let config: TelemetryConfig = serde_json::from_str(r#"{"json_output": true}"#).unwrap();
        assert_eq!(config.level, "info");
        assert!(config.json_output);
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = TelemetryConfig {
            level: "not a [valid directive".to_string(),
            ..TelemetryConfig::default()
        };
        // must not panic
        let _ = build_filter(&config);
    }

    #[test]
    fn test_second_init_reports_error() {
        let config = TelemetryConfig::default();
        let _ = try_init_subscriber(&config);
        assert!(try_init_subscriber(&config).is_err());
    }
}
