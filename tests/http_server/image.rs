use crate::helpers::*;

#[tokio::test]
async fn existing_image_is_served() {
    let server = TestServer::new().await;
    std::fs::write(server.image_dir.join("alert_1.jpg"), b"\xFF\xD8jpeg").unwrap();

    let resp = server.get("/api/image/alert_1.jpg").await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "image/jpeg");
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"\xFF\xD8jpeg");

    server.cleanup();
}

#[tokio::test]
async fn missing_image_is_not_found() {
    let server = TestServer::new().await;

    let resp = server.get("/api/image/nothing.jpg").await;

    assert_eq!(resp.status(), 404);

    server.cleanup();
}

#[tokio::test]
async fn traversal_outside_image_dir_is_not_found() {
    let server = TestServer::new().await;
    // A file right next to the image directory.
    std::fs::write(server.image_dir.parent().unwrap().join("secret.jpg"), b"secret").unwrap();

    for path in ["/api/image/..%2Fsecret.jpg", "/api/image/%2E%2E", "/api/image/..%5Csecret.jpg"] {
        let resp = server.get(path).await;
        assert_eq!(resp.status(), 404, "{path}");
    }

    server.cleanup();
}
