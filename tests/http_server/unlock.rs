use guardian::{
    models::{EventClass, EventLogEntry, UnlockMethod, UnlockStatus},
    persistence::StateKey,
};
use serde_json::json;

use crate::helpers::*;

async fn unlock_status(server: &TestServer) -> Option<UnlockStatus> {
    server
        .read_raw(StateKey::UnlockStatus)
        .await
        .map(|bytes| serde_json::from_slice(&bytes).expect("Unlock status is valid JSON"))
}

async fn history(server: &TestServer) -> Vec<EventLogEntry> {
    server
        .read_raw(StateKey::EventLog)
        .await
        .map(|bytes| serde_json::from_slice(&bytes).expect("Event log is valid JSON"))
        .unwrap_or_default()
}

#[tokio::test]
async fn correct_password_unlocks() {
    let server = TestServer::new().await;

    let resp = server.post_json("/api/unlock", json!({ "password": TEST_SECRET })).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().is_some());

    let status = unlock_status(&server).await.expect("Unlock status written");
    assert!(status.remote_unlocked);
    assert!(status.password_correct);
    assert_eq!(status.unlock_method, Some(UnlockMethod::Web));
    assert!(status.timestamp.is_some());

    let log = history(&server).await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].class(), EventClass::Success);
    assert_eq!(log[0].kind, "unlock");

    let snapshot: serde_json::Value = server.get("/api/status").await.json().await.unwrap();
    assert_eq!(snapshot["remote_unlocked"], true);
    assert_eq!(snapshot["awaiting_local_code"], false);

    server.cleanup();
}

#[tokio::test]
async fn wrong_password_is_unauthorized_without_mutation() {
    let server = TestServer::new().await;

    let resp = server.post_json("/api/unlock", json!({ "password": "0000" })).await;

    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(unlock_status(&server).await.is_none());

    let log = history(&server).await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].class(), EventClass::Failed);

    server.cleanup();
}

#[tokio::test]
async fn wrong_password_keeps_prior_unlock() {
    let server = TestServer::new().await;
    server.post_json("/api/unlock", json!({ "password": TEST_SECRET })).await;

    let resp = server.post_json("/api/unlock", json!({ "password": "0000" })).await;

    assert_eq!(resp.status(), 401);
    assert!(unlock_status(&server).await.unwrap().remote_unlocked);

    server.cleanup();
}

#[tokio::test]
async fn missing_or_invalid_password_is_bad_request() {
    let server = TestServer::new().await;

    for body in [json!({}), json!({ "password": "" }), json!({ "password": 1234 }), json!(null)] {
        let resp = server.post_json("/api/unlock", body.clone()).await;
        assert_eq!(resp.status(), 400, "{body}");
        let payload: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(payload["success"], false);
    }

    let resp = server.post("/api/unlock").await.body("not json").send().await.unwrap();
    assert_eq!(resp.status(), 400);

    assert!(unlock_status(&server).await.is_none());
    assert!(history(&server).await.is_empty());

    server.cleanup();
}

#[tokio::test]
async fn reset_unlock_restores_defaults() {
    let server = TestServer::new().await;
    server.post_json("/api/unlock", json!({ "password": TEST_SECRET })).await;

    let resp = server.post("/api/reset-unlock").await.send().await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let raw: serde_json::Value =
        serde_json::from_slice(&server.read_raw(StateKey::UnlockStatus).await.unwrap()).unwrap();
    assert_eq!(
        raw,
        json!({ "remote_unlocked": false, "password_correct": false, "timestamp": null })
    );

    server.cleanup();
}
