use serde::Serialize;

use crate::{LLMError, LLMProvider};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize)]
pub struct ProviderSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl ProviderSettings {
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LLMSettings {
    pub provider: LLMProvider,
    pub gemini: ProviderSettings,
    pub openai: ProviderSettings,
}

impl LLMSettings {
    pub fn from_env() -> Result<Self, LLMError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup, so callers are not tied to the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LLMError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = lookup("MODEL_PROVIDER")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "gemini".to_string())
            .parse::<LLMProvider>()?;

        let value_or = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            provider,
            gemini: ProviderSettings {
                api_key: lookup("GEMINI_API_KEY").and_then(|key| normalize_api_key(&key)),
                model: value_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_base: value_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            },
            openai: ProviderSettings {
                api_key: lookup("OPENAI_API_KEY").and_then(|key| normalize_api_key(&key)),
                model: value_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
                api_base: value_or("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE),
            },
        })
    }

    pub fn for_provider(&self, provider: LLMProvider) -> &ProviderSettings {
        match provider {
            LLMProvider::Gemini => &self.gemini,
            LLMProvider::OpenAI => &self.openai,
        }
    }

    /// Startup check: the selected provider has no key configured.
    pub fn missing_api_key(&self) -> Option<&'static str> {
        if self.for_provider(self.provider).has_api_key() {
            None
        } else {
            Some(self.provider.api_key_var())
        }
    }
}

/// `.env` files often carry quoted values; strip whitespace and one layer of
/// quotes. Blank keys count as absent.
fn normalize_api_key(raw: &str) -> Option<String> {
    let key = raw.trim().trim_matches('"').trim_matches('\'').trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
