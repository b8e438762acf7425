use std::sync::Arc;

use muse_llm::{GenerationParams, LLMClient, LLMProvider};
use serde::{Deserialize, Serialize};

use crate::{
    core::error::AppError,
    history::content_record::ContentDraft,
    prompts::content_prompt::{default_length_words, ContentPrompt, PromptOptions},
};

/// Body of a generate (or regenerate) request. Omitted selections take the
/// form defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    pub keyword: String,
    pub content_type: Option<String>,
    pub language: Option<String>,
    pub tone: Option<String>,
    pub audience: Option<String>,
    pub rhyme_scheme: Option<String>,
    pub length_words: Option<u32>,
    pub tags: String,
    pub provider: Option<LLMProvider>,
}

impl GenerationRequest {
    pub fn options(&self) -> PromptOptions {
        let defaults = PromptOptions::default();
        let content_type = self.content_type.clone().unwrap_or(defaults.content_type);

        PromptOptions {
            keyword: self.keyword.clone(),
            length_words: self
                .length_words
                .unwrap_or_else(|| default_length_words(&content_type)),
            content_type,
            language: self.language.clone().unwrap_or(defaults.language),
            tone: self.tone.clone().unwrap_or(defaults.tone),
            audience: self.audience.clone().unwrap_or(defaults.audience),
            rhyme_scheme: self.rhyme_scheme.clone().unwrap_or(defaults.rhyme_scheme),
        }
        .normalize()
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedContent {
    pub provider: LLMProvider,
    pub prompt: String,
    pub draft: ContentDraft,
}

#[derive(Clone)]
pub struct GenerationService {
    llm_client: Arc<LLMClient>,
    params: GenerationParams,
}

impl GenerationService {
    pub fn new(llm_client: LLMClient) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            params: GenerationParams::default(),
        }
    }

    pub fn provider(&self) -> LLMProvider {
        self.llm_client.provider()
    }

    pub fn llm_client(&self) -> &LLMClient {
        &self.llm_client
    }

    /// Builds the prompt and asks the provider once. Nothing is saved; the
    /// caller decides whether to keep the draft.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GeneratedContent, AppError> {
        let options = request.options();
        if options.keyword.is_empty() {
            return Err(AppError::InvalidRequest(
                "Please enter a keyword first.".to_string(),
            ));
        }

        let provider = request.provider.unwrap_or_else(|| self.provider());
        let prompt = ContentPrompt::build(&options);

        tracing::info!(
            %provider,
            content_type = %options.content_type,
            keyword = %options.keyword,
            "generating content"
        );

        let output = self
            .llm_client
            .generate_text(&prompt, provider, &self.params)
            .await?;

        Ok(GeneratedContent {
            provider,
            prompt,
            draft: ContentDraft::new(options, request.tags.trim().to_string(), output),
        })
    }
}
