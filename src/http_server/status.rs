//! Represents the `/api/status` and `/health` endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

use super::{ApiError, ApiState};
use crate::models::{AlarmStatus, AlertKind, UnlockStatus};

/// The merged status snapshot polled by the dashboard front end.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StatusResponse {
    /// Whether an alarm is raised.
    pub alarm_active: bool,
    /// Alarm kind, only while active.
    pub alarm_type: Option<AlertKind>,
    /// When the alarm was raised.
    pub alarm_time: Option<String>,
    /// Detector confidence, only while active.
    pub alarm_confidence: Option<f64>,
    /// Seconds left on the escalation countdown, only while active.
    pub alarm_countdown: Option<u64>,
    /// Human-readable countdown, only while active.
    pub alarm_countdown_str: Option<String>,
    /// Whether a remote unlock has been granted.
    pub remote_unlocked: bool,
    /// Remote approval given, local code still outstanding.
    pub awaiting_local_code: bool,
    /// Current server time, RFC 3339 in UTC.
    pub server_time: String,
    /// Process uptime in seconds.
    pub uptime: f64,
}

impl StatusResponse {
    /// Builds a snapshot from the two status records.
    pub fn new(alarm: &AlarmStatus, unlock: &UnlockStatus, uptime: f64) -> Self {
        Self {
            alarm_active: alarm.active,
            alarm_type: alarm.visible_kind().cloned(),
            alarm_time: alarm.timestamp.clone(),
            alarm_confidence: alarm.visible_confidence(),
            alarm_countdown: alarm.countdown.filter(|_| alarm.active),
            alarm_countdown_str: alarm.countdown_str.clone().filter(|_| alarm.active),
            remote_unlocked: unlock.remote_unlocked,
            awaiting_local_code: unlock.awaiting_local_code(),
            server_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            uptime,
        }
    }
}

/// Retrieves the merged alarm and unlock status.
pub async fn status(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let alarm = state.statuses.alarm_status().await;
    let unlock = state.statuses.unlock_status().await;
    let response = StatusResponse::new(&alarm, &unlock, state.app_metrics.uptime().as_secs_f64());
    Ok((StatusCode::OK, Json(response)))
}

/// Liveness check.
pub async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "uptime": state.app_metrics.uptime().as_secs_f64(),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
