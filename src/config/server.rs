use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for the dashboard HTTP server.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address and port for the HTTP server to listen on.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Directory holding evidence images captured by the controller.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen_address: default_listen_address(), image_dir: default_image_dir() }
    }
}

/// Provides the default value for listen_address.
fn default_listen_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Provides the default value for image_dir.
fn default_image_dir() -> PathBuf {
    PathBuf::from("/tmp/guardian_images")
}
