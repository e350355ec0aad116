//! HTTP server module for the local dashboard.

mod control;
mod error;
mod history;
mod image;
mod status;
mod unlock;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
pub use error::ApiError;
pub use status::StatusResponse;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::{
    config::AppConfig,
    context::AppMetrics,
    persistence::{EventLog, StatusRepository},
};

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Shared application configuration.
    pub config: Arc<AppConfig>,
    /// Typed access to the status records.
    pub statuses: StatusRepository,
    /// The shared event history.
    pub event_log: Arc<EventLog>,
    /// Process metrics.
    pub app_metrics: AppMetrics,
}

/// Errors that stop the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured listen address is not a socket address.
    #[error("Invalid server.listen_address '{address}': {source}")]
    InvalidAddress {
        /// The configured value.
        address: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// The listener could not be bound.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// The address that was tried.
        address: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the dashboard router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/status", get(status::status))
        .route("/api/unlock", post(unlock::unlock))
        .route("/api/reset-unlock", post(unlock::reset_unlock))
        .route("/api/control", post(control::control))
        .route("/api/history", get(history::history))
        .route("/api/image/{filename}", get(image::image))
        .route("/health", get(status::health))
        .with_state(state)
}

/// Binds the configured listen address.
pub async fn bind(config: &AppConfig) -> Result<TcpListener, ServerError> {
    let address: SocketAddr = config.server.listen_address.parse().map_err(|source| {
        ServerError::InvalidAddress { address: config.server.listen_address.clone(), source }
    })?;
    TcpListener::bind(address).await.map_err(|source| ServerError::Bind { address, source })
}

/// Serves the dashboard on an already bound listener until the task is
/// dropped or the server fails.
pub async fn serve(listener: TcpListener, state: ApiState) -> Result<(), ServerError> {
    if let Ok(address) = listener.local_addr() {
        tracing::info!(address = %address, "Dashboard listening.");
    }
    axum::serve(listener, create_router(state).into_make_service())
        .await
        .map_err(ServerError::Serve)
}

/// Extracts a non-empty string field from a JSON object body. Anything else,
/// including a body that is not JSON, yields `None`.
fn string_field(body: &[u8], field: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get(field)?.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}
