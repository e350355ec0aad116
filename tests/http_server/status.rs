use guardian::{models::AlertKind, persistence::StateKey, test_helpers::AlarmStatusBuilder};

use crate::helpers::*;

#[tokio::test]
async fn status_with_no_files_returns_defaults() {
    let server = TestServer::new().await;

    let resp = server.get("/api/status").await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["alarm_active"], false);
    assert!(body["alarm_type"].is_null());
    assert!(body["alarm_confidence"].is_null());
    assert_eq!(body["remote_unlocked"], false);
    assert_eq!(body["awaiting_local_code"], false);
    assert!(body["uptime"].as_f64().is_some());
    assert!(body["server_time"].as_str().unwrap().ends_with('Z'));

    server.cleanup();
}

#[tokio::test]
async fn status_reports_active_alarm() {
    let server = TestServer::new().await;
    let alarm = AlarmStatusBuilder::new()
        .active(AlertKind::PigIntrusion, 0.98)
        .timestamp("2025-01-09 14:25:05")
        .countdown(240)
        .build();
    server.write_raw(StateKey::AlarmStatus, &serde_json::to_vec(&alarm).unwrap()).await;

    let body: serde_json::Value = server.get("/api/status").await.json().await.unwrap();

    assert_eq!(body["alarm_active"], true);
    assert_eq!(body["alarm_type"], "pig_intrusion");
    assert_eq!(body["alarm_time"], "2025-01-09 14:25:05");
    assert_eq!(body["alarm_confidence"], 0.98);
    assert_eq!(body["alarm_countdown"], 240);
    assert_eq!(body["alarm_countdown_str"], "04:00");

    server.cleanup();
}

#[tokio::test]
async fn status_hides_details_of_cleared_alarm() {
    let server = TestServer::new().await;
    server
        .write_raw(
            StateKey::AlarmStatus,
            br#"{"alarm_active":false,"alarm_type":"stranger","confidence":0.7}"#,
        )
        .await;

    let body: serde_json::Value = server.get("/api/status").await.json().await.unwrap();

    assert_eq!(body["alarm_active"], false);
    assert!(body["alarm_type"].is_null());
    assert!(body["alarm_confidence"].is_null());

    server.cleanup();
}

#[tokio::test]
async fn status_survives_corrupt_files() {
    let server = TestServer::new().await;
    server.write_raw(StateKey::AlarmStatus, b"{\"alarm_active\": tru").await;
    server.write_raw(StateKey::UnlockStatus, b"garbage").await;

    let resp = server.get("/api/status").await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["alarm_active"], false);
    assert_eq!(body["remote_unlocked"], false);

    server.cleanup();
}
