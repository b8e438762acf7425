use axum::{routing::get, Router};

use crate::{
    generation::generation_controller::generation_router,
    health::health_controller,
    history::history_controller::{self, history_router},
};

pub fn application_router() -> Router {
    Router::new()
        .route("/v1/health", get(health_controller::health))
        .route("/v1/analytics", get(history_controller::analytics))
        .nest("/v1/content", generation_router())
        .nest("/v1/history", history_router())
}
