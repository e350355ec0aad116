//! Handler for operator control commands.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::{ApiError, ApiState, string_field};
use crate::models::{ControlCommand, EventLogEntry};

/// Writes an operator command for the controller to pick up.
///
/// Expects `{ "action": "open_door" | "mute_alarm" | "reset" | "test_alarm" }`.
/// The controller does not acknowledge commands.
pub async fn control(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let action = string_field(&body, "action")
        .and_then(|action| action.parse::<ControlCommand>().ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid control command.".to_string()))?;

    state.statuses.write_control_command(action).await.map_err(|e| {
        ApiError::InternalServerError(format!("Failed to send control command: {e}"))
    })?;
    state
        .event_log
        .record(EventLogEntry::now(format!("Control command: {action}"), "control", "success"))
        .await;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "action": action.as_str(),
            "message": format!("Executed: {action}")
        })),
    ))
}
