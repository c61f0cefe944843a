//! Router construction and the serve loop

use crate::anonymization::AnonymizationEngine;
use crate::domain::{MaskError, Result};
use crate::server::routes::{
    anonymize_handler, config_handler, deanonymize_handler, get_mappings_handler, health_handler,
};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnonymizationEngine>,
}

impl AppState {
    pub fn new(engine: Arc<AnonymizationEngine>) -> Self {
        Self { engine }
    }
}

/// Build the router with CORS and request tracing
pub fn build_app(engine: Arc<AnonymizationEngine>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/get_mappings", get(get_mappings_handler))
        .route("/config", post(config_handler))
        .route("/anonymize", post(anonymize_handler))
        .route("/deanonymize", post(deanonymize_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(engine))
}

/// Bind `address` and serve until `shutdown` flips to `true`
pub async fn serve(
    engine: Arc<AnonymizationEngine>,
    address: &str,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| MaskError::Configuration(format!("Failed to bind {address}: {e}")))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening");

    axum::serve(listener, build_app(engine))
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            tracing::info!("Shutting down HTTP server");
        })
        .await?;

    Ok(())
}
