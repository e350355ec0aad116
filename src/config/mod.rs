//! Configuration module for Guardian.

mod app_config;
mod helpers;
mod relay;
mod server;
mod state;

pub use app_config::{AppConfig, AppConfigBuilder, DEFAULT_UNLOCK_SECRET};
pub use helpers::{deserialize_base_url, deserialize_duration_from_ms, serialize_duration_to_ms};
pub use relay::RelayConfig;
pub use server::ServerConfig;
pub use state::StateFilesConfig;
