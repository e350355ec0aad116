//! Handlers for the remote unlock endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use super::{ApiError, ApiState, string_field};
use crate::models::{EventLogEntry, UnlockMethod, UnlockStatus};

/// Verifies the submitted password and grants a remote unlock.
///
/// Expects `{ "password": "..." }`. A missing, empty or non-string password is
/// a bad request; a wrong one is unauthorized. Neither changes state.
pub async fn unlock(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let password = string_field(&body, "password")
        .ok_or_else(|| ApiError::BadRequest("Please enter a password.".to_string()))?;

    if password != state.config.unlock_secret {
        tracing::warn!("Remote unlock via web rejected: wrong password.");
        state
            .event_log
            .record(EventLogEntry::now("Remote unlock failed (wrong password)", "unlock", "failed"))
            .await;
        return Err(ApiError::Unauthorized("Wrong password, please try again.".to_string()));
    }

    let status = UnlockStatus::granted(
        UnlockMethod::Web,
        None,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    state.statuses.write_unlock_status(&status).await?;
    state
        .event_log
        .record(EventLogEntry::now("Remote unlock succeeded", "unlock", "success"))
        .await;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Remote verification passed! Enter the on-site code to finish unlocking."
        })),
    ))
}

/// Restores the unlock status to its locked defaults.
pub async fn reset_unlock(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    state.statuses.reset_unlock_status().await?;
    Ok((StatusCode::OK, Json(json!({ "success": true, "message": "Unlock status reset." }))))
}
