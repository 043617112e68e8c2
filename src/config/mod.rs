//! Configuration for the pipeline, grounded on the teacher's
//! `config::GatewayConfig` (file -> env-expand -> TOML -> validate) — minus
//! the sections that have no counterpart here (auth, UI, secrets managers).

mod engines;
mod observability;
mod scheduler;
mod server;

use std::path::Path;

pub use engines::{EngineConfig, EnginesConfig};
pub use observability::{LogFormat, ObservabilityConfig};
pub use scheduler::SchedulerConfig;
pub use server::ServerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub engines: EnginesConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl PipelineConfig {
    /// Load configuration from a TOML file, expanding `${VAR_NAME}`
    /// environment variable references first.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;
        Self::from_str(&contents)
    }

    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(contents)?;
        let mut config: PipelineConfig = toml::from_str(&expanded).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.server.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("server.data_dir must be set".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for name in self.engines.0.keys() {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate engine name: {name}"
                )));
            }
        }
        for (name, engine) in &self.engines.0 {
            engine
                .validate()
                .map_err(|e| ConfigError::Validation(format!("engine {name}: {e}")))?;
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {1:?}: {0}")]
    Io(std::io::Error, std::path::PathBuf),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("configuration validation error: {0}")]
    Validation(String),
}

/// Expand `${VAR_NAME}` references against the process environment.
fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    let mut err = None;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        match std::env::var(var) {
            Ok(value) => value,
            Err(_) => {
                err.get_or_insert_with(|| ConfigError::EnvVarNotFound(var.to_string()));
                String::new()
            }
        }
    });
    if let Some(e) = err {
        return Err(e);
    }
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_data_dir() {
        let err = PipelineConfig::from_str("").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn expands_env_vars() {
        unsafe { std::env::set_var("LINGUAFEED_TEST_TOKEN", "secret123") };
        let toml = r#"
            [server]
            data_dir = "/tmp/linguafeed"

            [engines.gpt]
            type = "chat"
            base_url = "https://api.openai.com/v1"
            api_key_env = "LINGUAFEED_TEST_TOKEN"
            model = "gpt-3.5-turbo"
        "#;
        let cfg = PipelineConfig::from_str(toml).unwrap();
        assert_eq!(cfg.engines.0["gpt"].base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn rejects_summary_detail_out_of_range() {
        let toml = r#"
            [server]
            data_dir = "/tmp/linguafeed"

            [engines.gpt]
            type = "chat"
            base_url = "https://api.openai.com/v1"
            api_key_env = "NOPE"
            model = "gpt-3.5-turbo"
            max_tokens = 2000
        "#;
        // summary_detail lives on the SourceFeed, not engine config; this
        // test instead checks engine validation rejects a zero max_tokens.
        let mut cfg = PipelineConfig::from_str(toml).unwrap();
        cfg.engines.0.get_mut("gpt").unwrap().max_tokens = 0;
        assert!(cfg.validate().is_err());
    }
}
