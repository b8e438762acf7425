use axum::{Extension, Json};
use serde::Serialize;

use crate::app_module::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryHealth {
    pub path: String,
    pub readable: bool,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub model: String,
    pub api_key_configured: bool,
    pub history: HistoryHealth,
}

/// Reports configuration problems without failing: the service keeps running
/// with a missing key or a corrupt history file.
pub async fn health(Extension(ctx): Extension<AppState>) -> Json<HealthResponse> {
    let generation = &ctx.service.generation_service;
    let provider = generation.provider();
    let provider_settings = generation.llm_client().settings().for_provider(provider);

    let store = &ctx.service.history_store;
    let loaded = store
        .run(|store| store.try_load())
        .await
        .and_then(|result| result);
    let history = match loaded {
        Ok(records) => HistoryHealth {
            path: store.path().display().to_string(),
            readable: true,
            records: records.len(),
            error: None,
        },
        Err(e) => HistoryHealth {
            path: store.path().display().to_string(),
            readable: false,
            records: 0,
            error: Some(e.to_string()),
        },
    };

    let status = if provider_settings.has_api_key() && history.readable {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        provider: provider.to_string(),
        model: provider_settings.model.clone(),
        api_key_configured: provider_settings.has_api_key(),
        history,
    })
}
