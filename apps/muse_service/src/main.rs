use std::time::Duration;

use anyhow::Context;
use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError, Extension, Router};
use dotenvy::dotenv;
use muse_service::{app_module::AppState, app_router::application_router, core::config::AppConfig};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = AppConfig::from_env().context("invalid configuration")?;

    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    // try_init also routes `log` records from muse_llm into tracing.
    if config.is_dev() {
        subscriber_builder
            .pretty()
            .with_ansi(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!("setting dev subscriber failed: {}", e))?;
    } else {
        subscriber_builder
            .json()
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("setting prod subscriber failed: {}", e))?;
    }

    if let Some(key_var) = config.llm.missing_api_key() {
        tracing::warn!(
            provider = %config.llm.provider,
            "{} is not set; generation requests will fail until it is configured",
            key_var
        );
    }

    let bind_address = config.bind_address.clone();
    // Generation has its own deadline; leave headroom for it.
    let request_timeout = config
        .generation_timeout
        .saturating_add(Duration::from_secs(5));
    let state = AppState::new(config);

    let app = Router::new().merge(application_router()).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|error: BoxError| async move {
                if error.is::<tower::timeout::error::Elapsed>() {
                    Ok(StatusCode::REQUEST_TIMEOUT)
                } else {
                    Err((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Unhandled internal error: {}", error),
                    ))
                }
            }))
            .timeout(request_timeout)
            .layer(TraceLayer::new_for_http())
            .layer(Extension(state))
            .layer(
                CorsLayer::new()
                    .allow_origin(tower_http::cors::Any)
                    .allow_methods(tower_http::cors::Any)
                    .allow_headers(tower_http::cors::Any),
            )
            .into_inner(),
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("unable to bind {}", bind_address))?;

    tracing::info!("Server started, listening on {}", bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
