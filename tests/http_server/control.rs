use guardian::persistence::StateKey;
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn valid_action_is_written_verbatim() {
    let server = TestServer::new().await;

    let resp = server.post_json("/api/control", json!({ "action": "open_door" })).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["action"], "open_door");
    assert_eq!(std::fs::read_to_string(&server.paths.control_command).unwrap(), "open_door");

    server.cleanup();
}

#[tokio::test]
async fn later_action_replaces_earlier_one() {
    let server = TestServer::new().await;

    for action in ["mute_alarm", "test_alarm", "reset"] {
        let resp = server.post_json("/api/control", json!({ "action": action })).await;
        assert_eq!(resp.status(), 200);
    }

    assert_eq!(server.read_raw(StateKey::ControlCommand).await.unwrap(), b"reset");

    server.cleanup();
}

#[tokio::test]
async fn unknown_action_is_rejected_without_mutation() {
    let server = TestServer::new().await;
    server.post_json("/api/control", json!({ "action": "open_door" })).await;

    for body in [json!({ "action": "fly" }), json!({}), json!({ "action": 7 }), json!({ "action": "" })]
    {
        let resp = server.post_json("/api/control", body.clone()).await;
        assert_eq!(resp.status(), 400, "{body}");
        let payload: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(payload["success"], false);
    }

    assert_eq!(server.read_raw(StateKey::ControlCommand).await.unwrap(), b"open_door");

    server.cleanup();
}
