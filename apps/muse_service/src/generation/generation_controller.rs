use axum::{
    routing::{get, post},
    Extension, Json, Router,
};

use super::generation_service::{GeneratedContent, GenerationRequest};
use crate::{
    app_module::AppState,
    core::error::AppError,
    prompts::content_prompt::{ContentPrompt, OptionCatalogue},
};

pub fn generation_router() -> Router {
    Router::new()
        .route("/options", get(options))
        .route("/generate", post(generate))
}

pub async fn options() -> Json<OptionCatalogue> {
    Json(ContentPrompt::catalogue())
}

pub async fn generate(
    Extension(ctx): Extension<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GeneratedContent>, AppError> {
    let generated = ctx.service.generation_service.generate(request).await?;
    Ok(Json(generated))
}
