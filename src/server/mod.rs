mod error;
mod handlers;
mod state;

use anyhow::Context;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeader;
use tower_http::trace::TraceLayer;

use crate::config::Config;

pub use error::ApiError;
pub use state::AppState;

/// API routes plus the static frontend as fallback. Static files are never
/// cached by the browser.
pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    let files = ServeDir::new(public_dir);
    let files = SetResponseHeader::overriding(
        files,
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    let files = SetResponseHeader::overriding(files, header::PRAGMA, HeaderValue::from_static("no-cache"));
    let files = SetResponseHeader::overriding(files, header::EXPIRES, HeaderValue::from_static("0"));

    Router::new()
        .route("/api/prices", get(handlers::prices))
        .route("/api/geocode", get(handlers::geocode))
        .route("/api/weather", get(handlers::weather))
        .route("/api/chat", post(handlers::chat))
        .route("/api/analyze-crop-image", post(handlers::analyze_crop_image))
        .route("/api/cities", get(handlers::cities))
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config);
    if config.gemini_key().is_none() {
        tracing::warn!("GEMINI_API_KEY not set; chat endpoints will answer 500");
    }
    if config.data_gov_key().is_none() {
        tracing::warn!(
            "DATA_GOV_API_KEY not set and no key is built in; /api/prices will answer 500 until one is configured (https://data.gov.in)"
        );
    }

    let app = build_router(state, &config.public_dir);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind to {}", addr))?;

    tracing::info!(
        addr = %addr,
        public_dir = %config.public_dir.display(),
        offline = config.offline,
        "AgriPulse server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
