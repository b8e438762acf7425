use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use muse_llm::LLMError;
use serde_json::json;

use super::*;

impl From<LLMError> for ConfigError {
    fn from(error: LLMError) -> Self {
        match error {
            LLMError::Configuration(message) => ConfigError::Invalid(message),
            other => ConfigError::Loading(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Generation(e) if !e.is_provider_error() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Config(_) | AppError::Generation(_) => Some(API_KEY_HINT),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        let body = match self.hint() {
            Some(hint) => json!({ "error": self.to_string(), "hint": hint }),
            None => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
