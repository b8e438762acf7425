use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::timeout;

pub mod config;
pub mod error;
pub mod gemini;
pub mod openai;

#[cfg(test)]
mod test_server;

pub use config::{LLMSettings, ProviderSettings};
pub use error::LLMError;

/// Returned when a provider answers with a well-formed but empty response.
pub const NO_RESPONSE: &str = "No response generated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    Gemini,
    OpenAI,
}

impl LLMProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "gemini",
            LLMProvider::OpenAI => "openai",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "GEMINI_API_KEY",
            LLMProvider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LLMProvider {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(LLMProvider::Gemini),
            "openai" => Ok(LLMProvider::OpenAI),
            other => Err(LLMError::Configuration(format!(
                "Unknown model provider: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
        }
    }
}

#[async_trait]
pub trait LLMService {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LLMError>;
}

pub struct LLMClientConfig {
    pub timeout: Duration,
}

impl Default for LLMClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct LLMClient {
    settings: LLMSettings,
    config: LLMClientConfig,
    http: reqwest::Client,
}

impl LLMClient {
    pub fn new(settings: LLMSettings, config: Option<LLMClientConfig>) -> Self {
        Self {
            settings,
            config: config.unwrap_or_default(),
            http: reqwest::Client::new(),
        }
    }

    /// The provider selected by configuration.
    pub fn provider(&self) -> LLMProvider {
        self.settings.provider
    }

    pub fn settings(&self) -> &LLMSettings {
        &self.settings
    }

    fn service(&self, provider: LLMProvider) -> Result<Box<dyn LLMService + Send + Sync>, LLMError> {
        let settings = self.settings.for_provider(provider);
        let api_key = settings.api_key.clone().ok_or_else(|| {
            LLMError::Configuration(format!(
                "{} not found in environment. Set it in .env.",
                provider.api_key_var()
            ))
        })?;

        let service: Box<dyn LLMService + Send + Sync> = match provider {
            LLMProvider::Gemini => Box::new(gemini::GeminiService::new(
                self.http.clone(),
                api_key,
                settings.model.clone(),
                settings.api_base.clone(),
            )),
            LLMProvider::OpenAI => Box::new(openai::OpenAIService::new(
                self.http.clone(),
                api_key,
                settings.model.clone(),
                settings.api_base.clone(),
            )),
        };

        Ok(service)
    }

    /// Sends one prompt to `provider`. A single attempt, bounded by the
    /// configured deadline.
    pub async fn generate_text(
        &self,
        prompt: &str,
        provider: LLMProvider,
        params: &GenerationParams,
    ) -> Result<String, LLMError> {
        let service = self.service(provider)?;

        log::debug!(
            "Generating with {} (max_tokens={}, temperature={})",
            provider,
            params.max_tokens,
            params.temperature
        );

        match timeout(self.config.timeout, service.generate(prompt, params)).await {
            Ok(result) => {
                if let Err(e) = &result {
                    log::error!("{} generation failed: {}", provider, e);
                }
                result
            }
            Err(_) => {
                log::error!(
                    "{} generation timed out after {:?}",
                    provider,
                    self.config.timeout
                );
                Err(LLMError::Timeout {
                    provider,
                    after: self.config.timeout,
                })
            }
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }
}

/// Trims provider output, substituting [`NO_RESPONSE`] when nothing is left.
pub(crate) fn text_or_sentinel(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NO_RESPONSE.to_string(),
    }
}
