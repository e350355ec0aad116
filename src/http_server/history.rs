//! Handler for the event history endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{ApiError, ApiState};

/// Returns the event log, newest first.
pub async fn history(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    Ok((StatusCode::OK, Json(state.event_log.entries().await)))
}
