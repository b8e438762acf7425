use std::{path::PathBuf, time::Duration};

use muse_llm::LLMSettings;

use crate::core::error::ConfigError;

const DEFAULT_HISTORY_FILE: &str = "content_history.json";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
const MAX_GENERATION_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub bind_address: String,
    pub history_file: PathBuf,
    pub generation_timeout: Duration,
    pub llm: LLMSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let generation_timeout = match value("GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "GENERATION_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_GENERATION_TIMEOUT_SECS,
        };
        if generation_timeout == 0 || generation_timeout > MAX_GENERATION_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "GENERATION_TIMEOUT_SECS must be between 1 and {}, got {}",
                MAX_GENERATION_TIMEOUT_SECS, generation_timeout
            )));
        }

        Ok(Self {
            environment: value("APP_ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),
            bind_address: value("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            history_file: value("HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
            generation_timeout: Duration::from_secs(generation_timeout),
            llm: LLMSettings::from_lookup(&lookup)?,
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }
}
