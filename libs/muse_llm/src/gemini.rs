use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{text_or_sentinel, GenerationParams, LLMError, LLMProvider, LLMService};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

impl GeminiRequest {
    fn new(prompt: &str, params: &GenerationParams) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        }
    }
}

impl GeminiResponse {
    /// Text of the first part of the first candidate.
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

fn extract_text(body: &str) -> Result<String, LLMError> {
    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| LLMError::MalformedResponse {
            provider: LLMProvider::Gemini,
            message: e.to_string(),
        })?;

    Ok(text_or_sentinel(response.first_text()))
}

pub struct GeminiService {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiService {
    pub fn new(client: Client, api_key: String, model: String, api_base: String) -> Self {
        Self {
            client,
            api_key,
            model,
            api_base,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LLMService for GeminiService {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LLMError> {
        let url = self.endpoint();
        let transport = |source: reqwest::Error| LLMError::Transport {
            provider: LLMProvider::Gemini,
            // the key travels in the query string
            source: source.without_url(),
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GeminiRequest::new(prompt, params))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Status {
                provider: LLMProvider::Gemini,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(transport)?;
        extract_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_server, NO_RESPONSE};
    use serde_json::json;

    fn service(api_base: String) -> GeminiService {
        GeminiService::new(
            Client::new(),
            "secret-key".to_string(),
            "gemini-2.0-flash".to_string(),
            api_base,
        )
    }

    #[test]
    fn request_uses_generate_content_schema() {
        let params = GenerationParams {
            max_tokens: 120,
            temperature: 0.5,
        };
        let value = serde_json::to_value(GeminiRequest::new("Write a haiku", &params)).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "Write a haiku"}]}],
                "generationConfig": {"temperature": 0.5, "maxOutputTokens": 120}
            })
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "  Stars hum softly.\n"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        })
        .to_string();

        assert_eq!(extract_text(&body).unwrap(), "Stars hum softly.");
    }

    #[test]
    fn empty_candidates_yield_sentinel() {
        assert_eq!(extract_text(r#"{"candidates": []}"#).unwrap(), NO_RESPONSE);
        assert_eq!(extract_text("{}").unwrap(), NO_RESPONSE);
        assert_eq!(
            extract_text(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap(),
            NO_RESPONSE
        );
    }

    #[test]
    fn unparsable_body_is_malformed() {
        assert!(matches!(
            extract_text("<html>bad gateway</html>"),
            Err(LLMError::MalformedResponse {
                provider: LLMProvider::Gemini,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn posts_prompt_with_key_in_query() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": "Dawn breaks."}]}}]});
        let (base, request) = test_server::respond_once("200 OK", &body.to_string()).await;

        let text = service(base)
            .generate("Write a haiku about 'dawn'.", &GenerationParams::default())
            .await
            .unwrap();
        assert_eq!(text, "Dawn breaks.");

        let request = request.await.unwrap();
        assert!(request
            .starts_with("POST /models/gemini-2.0-flash:generateContent?key=secret-key HTTP/1.1"));
        assert!(request.contains("\"maxOutputTokens\":300"));
    }

    #[tokio::test]
    async fn non_success_status_keeps_status_and_body() {
        let (base, _request) = test_server::respond_once(
            "500 Internal Server Error",
            r#"{"error": {"message": "backend exploded"}}"#,
        )
        .await;

        let err = service(base)
            .generate("prompt", &GenerationParams::default())
            .await
            .unwrap_err();

        match err {
            LLMError::Status {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, LLMProvider::Gemini);
                assert_eq!(status, 500);
                assert!(body.contains("backend exploded"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_hides_the_key() {
        let base = test_server::closed_port().await;

        let err = service(base)
            .generate("prompt", &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, LLMError::Transport { .. }));
        assert!(!err.to_string().contains("secret-key"));
        assert!(!format!("{err:?}").contains("secret-key"));
    }
}
