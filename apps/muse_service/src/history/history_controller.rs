use std::collections::HashSet;

use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{
    content_record::{ContentDraft, ContentRecord},
    history_analytics::HistoryAnalytics,
    history_export::{download_file_name, EXPORT_FILE_NAME},
};
use crate::{app_module::AppState, core::error::AppError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub favorite_only: bool,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub items: Vec<ContentRecord>,
    pub shown: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: HashSet<u64>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub id: u64,
    pub favorite: Option<bool>,
}

pub fn history_router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_history).post(save_content).delete(clear_history),
        )
        .route("/bulk-delete", post(bulk_delete))
        .route("/types", get(content_types))
        .route("/export", get(export_history))
        .route("/:id", delete(delete_content))
        .route("/:id/favorite", post(toggle_favorite))
        .route("/:id/download", get(download_content))
}

pub async fn list_history(
    Extension(ctx): Extension<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryListResponse>, AppError> {
    let (items, total) = ctx
        .service
        .history_store
        .run(move |store| {
            let items = store.search(
                params.query.as_deref().unwrap_or_default(),
                params.content_type.as_deref(),
                params.favorite_only,
            );
            (items, store.load().len())
        })
        .await?;

    Ok(Json(HistoryListResponse {
        shown: items.len(),
        items,
        total,
    }))
}

pub async fn save_content(
    Extension(ctx): Extension<AppState>,
    Json(draft): Json<ContentDraft>,
) -> Result<(StatusCode, Json<ContentRecord>), AppError> {
    if draft.keyword.trim().is_empty() || draft.output.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "A draft needs a keyword and generated output".to_string(),
        ));
    }

    let record = ctx
        .service
        .history_store
        .run(move |store| store.append(draft))
        .await??;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn clear_history(Extension(ctx): Extension<AppState>) -> Result<StatusCode, AppError> {
    ctx.service
        .history_store
        .run(|store| store.clear_all())
        .await??;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn bulk_delete(
    Extension(ctx): Extension<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let deleted = ctx
        .service
        .history_store
        .run(move |store| store.bulk_delete(&request.ids))
        .await??;
    Ok(Json(BulkDeleteResponse { deleted }))
}

pub async fn content_types(
    Extension(ctx): Extension<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let types = ctx
        .service
        .history_store
        .run(|store| store.content_types())
        .await?;
    Ok(Json(types))
}

pub async fn export_history(
    Extension(ctx): Extension<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let text = ctx
        .service
        .history_store
        .run(|store| store.export_as_text())
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        text,
    ))
}

pub async fn delete_content(
    Extension(ctx): Extension<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = ctx
        .service
        .history_store
        .run(move |store| store.delete(id))
        .await??;
    Ok(Json(DeleteResponse { deleted }))
}

pub async fn toggle_favorite(
    Extension(ctx): Extension<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<FavoriteResponse>, AppError> {
    let favorite = ctx
        .service
        .history_store
        .run(move |store| store.toggle_favorite(id))
        .await??;
    Ok(Json(FavoriteResponse { id, favorite }))
}

pub async fn download_content(
    Extension(ctx): Extension<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let record = ctx
        .service
        .history_store
        .run(move |store| store.get(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No saved content with id {}", id)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download_file_name(&record)),
            ),
        ],
        record.draft.output,
    ))
}

pub async fn analytics(
    Extension(ctx): Extension<AppState>,
) -> Result<Json<HistoryAnalytics>, AppError> {
    let summary = ctx
        .service
        .history_store
        .run(|store| HistoryAnalytics::from_records(&store.load()))
        .await?;
    Ok(Json(summary))
}
