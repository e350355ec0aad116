use std::fmt;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{RelayConfig, ServerConfig, StateFilesConfig};

/// The shared secret used when neither the config file nor `UNLOCK_PASSWORD`
/// provides one. Deployments are expected to override it.
pub const DEFAULT_UNLOCK_SECRET: &str = "1234";

/// Provides the default value for unlock_secret.
fn default_unlock_secret() -> String {
    std::env::var("UNLOCK_PASSWORD")
        .ok()
        .filter(|secret| !secret.is_empty())
        .unwrap_or_else(|| DEFAULT_UNLOCK_SECRET.to_string())
}

/// The `GUARDIAN__*` environment layer.
fn environment() -> Environment {
    Environment::with_prefix("GUARDIAN").separator("__")
}

/// Application configuration shared by the relay and the dashboard.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// The shared secret remote actors must supply to unlock.
    #[serde(default = "default_unlock_secret")]
    pub unlock_secret: String,

    /// Locations of the shared state files.
    #[serde(default)]
    pub state: StateFilesConfig,

    /// Notification relay configuration.
    #[serde(default)]
    pub relay: RelayConfig,

    /// Dashboard server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            unlock_secret: default_unlock_secret(),
            state: StateFilesConfig::default(),
            relay: RelayConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("unlock_secret", &"<redacted>")
            .field("state", &self.state)
            .field("relay", &self.relay)
            .field("server", &self.server)
            .finish()
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` from `<config_dir>/app.yaml` (optional)
    /// overlaid with `GUARDIAN__*` environment variables.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        Self::load(config_dir, environment())
    }

    /// Loads the file under the given environment source. Values from the
    /// environment stay strings until deserialized, so a secret such as
    /// `0123` keeps its leading zero.
    fn load(config_dir: Option<&str>, environment: Environment) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)).required(false))
            .add_source(environment)
            .build()?;
        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the system silently insecure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unlock_secret.is_empty() {
            return Err(ConfigError::Message("unlock_secret must not be empty".to_string()));
        }
        if self.relay.command_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Message("relay.command_prefix must not contain whitespace".to_string()));
        }
        Ok(())
    }

    /// True when the built-in default secret is in effect.
    pub fn uses_default_secret(&self) -> bool {
        self.unlock_secret == DEFAULT_UNLOCK_SECRET
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// A builder for creating `AppConfig` instances for testing.
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Sets the shared secret.
    pub fn unlock_secret(mut self, secret: &str) -> Self {
        self.config.unlock_secret = secret.to_string();
        self
    }

    /// Sets the state file layout.
    pub fn state(mut self, state: StateFilesConfig) -> Self {
        self.config.state = state;
        self
    }

    /// Sets the dashboard listen address.
    pub fn listen_address(mut self, address: &str) -> Self {
        self.config.server.listen_address = address.to_string();
        self
    }

    /// Sets the evidence image directory.
    pub fn image_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.server.image_dir = dir.into();
        self
    }

    /// Sets the relay configuration.
    pub fn relay(mut self, relay: RelayConfig) -> Self {
        self.config.relay = relay;
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> AppConfig {
        self.config
    }
}
