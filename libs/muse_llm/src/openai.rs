use async_trait::async_trait;

use crate::{GenerationParams, LLMError, LLMService};

#[cfg(feature = "openai")]
pub use client::OpenAIService;

#[cfg(not(feature = "openai"))]
pub use unavailable::OpenAIService;

#[cfg(feature = "openai")]
mod client {
    use async_openai::types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    };
    use reqwest::Client;

    use super::*;
    use crate::{text_or_sentinel, LLMProvider};

    /// Chat completions over the shared HTTP client; `async-openai` supplies
    /// the wire types.
    pub struct OpenAIService {
        client: Client,
        api_key: String,
        model: String,
        api_base: String,
    }

    impl OpenAIService {
        pub fn new(client: Client, api_key: String, model: String, api_base: String) -> Self {
            Self {
                client,
                api_key,
                model,
                api_base,
            }
        }

        #[allow(deprecated)]
        fn request(
            &self,
            prompt: &str,
            params: &GenerationParams,
        ) -> Result<CreateChatCompletionRequest, LLMError> {
            CreateChatCompletionRequestArgs::default()
                .model(self.model.as_str())
                .messages(vec![ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: prompt.to_string().into(),
                        name: None,
                    },
                )])
                .max_tokens(params.max_tokens)
                .temperature(params.temperature)
                .build()
                .map_err(|e| LLMError::Configuration(format!("Invalid OpenAI request: {}", e)))
        }
    }

    pub(super) fn first_choice_text(response: &CreateChatCompletionResponse) -> String {
        text_or_sentinel(
            response
                .choices
                .first()
                .and_then(|choice| choice.message.content.as_deref()),
        )
    }

    fn extract_text(body: &str) -> Result<String, LLMError> {
        let response: CreateChatCompletionResponse =
            serde_json::from_str(body).map_err(|e| LLMError::MalformedResponse {
                provider: LLMProvider::OpenAI,
                message: e.to_string(),
            })?;

        Ok(first_choice_text(&response))
    }

    #[async_trait]
    impl LLMService for OpenAIService {
        async fn generate(
            &self,
            prompt: &str,
            params: &GenerationParams,
        ) -> Result<String, LLMError> {
            let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
            let transport = |source: reqwest::Error| LLMError::Transport {
                provider: LLMProvider::OpenAI,
                source: source.without_url(),
            };

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&self.request(prompt, params)?)
                .send()
                .await
                .map_err(transport)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LLMError::Status {
                    provider: LLMProvider::OpenAI,
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response.text().await.map_err(transport)?;
            extract_text(&body)
        }
    }
}

#[cfg(not(feature = "openai"))]
mod unavailable {
    use super::*;

    /// Stand-in used when the crate is built without the `openai` feature.
    pub struct OpenAIService;

    impl OpenAIService {
        pub fn new(
            _client: reqwest::Client,
            _api_key: String,
            _model: String,
            _api_base: String,
        ) -> Self {
            Self
        }
    }

    #[async_trait]
    impl LLMService for OpenAIService {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, LLMError> {
            Err(LLMError::ClientUnavailable(
                "OpenAI client library is not compiled in; rebuild muse_llm with the `openai` feature"
                    .to_string(),
            ))
        }
    }
}
