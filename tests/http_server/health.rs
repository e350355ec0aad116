use crate::helpers::*;

#[tokio::test]
async fn health_endpoint_returns_healthy() {
    let server = TestServer::new().await;

    let resp = server.get("/health").await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime"].as_f64().is_some());
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());

    server.cleanup();
}
