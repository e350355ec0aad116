#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use guardian::{
    config::{AppConfig, StateFilesConfig},
    context::AppMetrics,
    http_server::{self, ApiState},
    persistence::{EventLog, FileStateStore, StateKey, StateStore, StatusRepository},
    test_helpers::create_test_file_store,
};
use reqwest::Client;
use tempfile::TempDir;
use tokio::task;

pub const TEST_SECRET: &str = "1234";

pub struct TestServer {
    pub address: SocketAddr,
    pub server_handle: task::JoinHandle<()>,
    pub client: Client,
    pub store: Arc<FileStateStore>,
    pub paths: StateFilesConfig,
    pub image_dir: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let (store, paths) = create_test_file_store(dir.path());
        let image_dir = dir.path().join("images");
        std::fs::create_dir_all(&image_dir).expect("Failed to create image dir");

        let config = AppConfig::builder()
            .unlock_secret(TEST_SECRET)
            .state(paths.clone())
            .listen_address("127.0.0.1:0")
            .image_dir(&image_dir)
            .build();

        let listener = http_server::bind(&config).await.expect("Failed to bind");
        let address = listener.local_addr().expect("Failed to get address");

        let shared: Arc<dyn StateStore> = store.clone();
        let state = ApiState {
            config: Arc::new(config),
            statuses: StatusRepository::new(Arc::clone(&shared)),
            event_log: Arc::new(EventLog::new(shared)),
            app_metrics: AppMetrics::default(),
        };

        // Spawn the actual app server
        let server_handle = task::spawn(async move {
            http_server::serve(listener, state).await.expect("Server failed");
        });

        Self { address, server_handle, client: Client::new(), store, paths, image_dir, _dir: dir }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.get(&url).send().await.expect("Request failed")
    }

    pub async fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("http://{}{}", self.address, path);
        self.client.post(&url)
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.post(path).await.json(&body).send().await.expect("Request failed")
    }

    pub async fn write_raw(&self, key: StateKey, contents: &[u8]) {
        self.store.write(key, contents.to_vec()).await.expect("Failed to write state");
    }

    pub async fn read_raw(&self, key: StateKey) -> Option<Vec<u8>> {
        self.store.read(key).await.expect("Failed to read state")
    }

    pub fn cleanup(self) {
        self.server_handle.abort();
    }
}
