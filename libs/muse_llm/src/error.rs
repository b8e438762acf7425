use std::time::Duration;

use thiserror::Error;

use crate::LLMProvider;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: LLMProvider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: LLMProvider,
        status: u16,
        body: String,
    },

    #[error("Malformed {provider} response: {message}")]
    MalformedResponse {
        provider: LLMProvider,
        message: String,
    },

    #[error("{provider} generation timed out after {after:?}")]
    Timeout {
        provider: LLMProvider,
        after: Duration,
    },
}

impl LLMError {
    /// Everything except a missing or invalid setting counts as a provider
    /// failure.
    pub fn is_provider_error(&self) -> bool {
        !matches!(self, LLMError::Configuration(_))
    }
}
