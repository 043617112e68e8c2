use serde::{Deserialize, Serialize};

/// Logging configuration, a deliberately smaller version of the teacher's
/// `ObservabilityConfig`/`LoggingConfig` split — no OTLP/SIEM layers, since
/// this crate has no multi-tenant gateway audit surface to feed them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or
    /// "linguafeed=debug,warn".
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

fn default_level() -> String {
    "info".to_string()
}
