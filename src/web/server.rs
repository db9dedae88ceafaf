//! HTTP server for the prediction form.

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

use crate::classifier::Classifier;
use crate::validation::RangePolicy;

use super::assets::Background;
use super::handlers;

/// Form submissions are a few hundred bytes; anything larger is rejected
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared read-only state for all requests
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub range_policy: RangePolicy,
    pub background: Option<Arc<Background>>,
}

impl AppState {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        range_policy: RangePolicy,
        background: Option<Background>,
    ) -> Self {
        Self {
            classifier,
            range_policy,
            background: background.map(Arc::new),
        }
    }
}

/// Build the router with all pages
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/predict",
            get(handlers::predict_form).post(handlers::predict_submit),
        )
        .route("/about", get(handlers::about))
        .route("/model", get(handlers::model_info))
        .route("/about-us", get(handlers::about_us))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// Serve the form until Ctrl+C
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind form server to {}", addr))?;
    info!("Form server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received Ctrl+C, shutting down...");
        })
        .await
        .context("Form server error")
}
