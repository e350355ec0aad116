use guardian::{
    models::EventLogEntry,
    persistence::{EVENT_LOG_CAPACITY, EventLog, StateStore},
};
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn history_without_log_serves_sample_entries() {
    let server = TestServer::new().await;

    let resp = server.get("/api/history").await;

    assert_eq!(resp.status(), 200);
    let body: Vec<EventLogEntry> = resp.json().await.unwrap();
    assert_eq!(body.len(), 3);

    server.cleanup();
}

#[tokio::test]
async fn history_is_newest_first_and_bounded() {
    let server = TestServer::new().await;
    let store: std::sync::Arc<dyn StateStore> = server.store.clone();
    let log = EventLog::new(store);
    for i in 0..55 {
        log.append(EventLogEntry::now(format!("event {i}"), "test", "normal")).await.unwrap();
    }

    let body: Vec<EventLogEntry> = server.get("/api/history").await.json().await.unwrap();

    assert_eq!(body.len(), EVENT_LOG_CAPACITY);
    assert_eq!(body[0].event, "event 54");
    assert_eq!(body[EVENT_LOG_CAPACITY - 1].event, "event 5");

    server.cleanup();
}

#[tokio::test]
async fn dashboard_actions_show_up_in_history() {
    let server = TestServer::new().await;
    server.post_json("/api/unlock", json!({ "password": "nope" })).await;
    server.post_json("/api/control", json!({ "action": "mute_alarm" })).await;

    let body: Vec<EventLogEntry> = server.get("/api/history").await.json().await.unwrap();

    assert_eq!(body.len(), 2);
    assert_eq!(body[0].kind, "control");
    assert_eq!(body[1].kind, "unlock");

    server.cleanup();
}
