use std::{fmt, time::Duration};

use serde::Deserialize;
use url::Url;

use super::{deserialize_base_url, deserialize_duration_from_ms};

const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10/";

/// Configuration for the notification relay.
#[derive(Deserialize, Clone)]
pub struct RelayConfig {
    /// Bot token for the messaging channel.
    /// If not set in config, falls back to the `DISCORD_TOKEN` env var.
    #[serde(default = "default_token_from_env")]
    pub token: Option<String>,

    /// Fixed destination channel. When unset, alerts go to the first text
    /// channel the bot can see.
    /// If not set in config, falls back to the `DISCORD_CHANNEL_ID` env var.
    #[serde(default = "default_channel_id_from_env")]
    pub channel_id: Option<String>,

    /// Base URL of the messaging REST API.
    #[serde(default = "default_api_base_url", deserialize_with = "deserialize_base_url")]
    pub api_base_url: Url,

    /// How often the alert queue file is checked.
    #[serde(
        rename = "poll_interval_ms",
        default = "default_poll_interval",
        deserialize_with = "deserialize_duration_from_ms"
    )]
    pub poll_interval: Duration,

    /// How often the destination channel is checked for new commands.
    #[serde(
        rename = "command_poll_interval_ms",
        default = "default_command_poll_interval",
        deserialize_with = "deserialize_duration_from_ms"
    )]
    pub command_poll_interval: Duration,

    /// Prefix that marks a chat message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            token: default_token_from_env(),
            channel_id: default_channel_id_from_env(),
            api_base_url: default_api_base_url(),
            poll_interval: default_poll_interval(),
            command_poll_interval: default_command_poll_interval(),
            command_prefix: default_command_prefix(),
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("channel_id", &self.channel_id)
            .field("api_base_url", &self.api_base_url.as_str())
            .field("poll_interval", &self.poll_interval)
            .field("command_poll_interval", &self.command_poll_interval)
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

/// Loads the bot token from the `DISCORD_TOKEN` environment variable.
fn default_token_from_env() -> Option<String> {
    std::env::var("DISCORD_TOKEN").ok().filter(|token| !token.is_empty())
}

/// Loads the destination channel from the `DISCORD_CHANNEL_ID` environment variable.
fn default_channel_id_from_env() -> Option<String> {
    std::env::var("DISCORD_CHANNEL_ID").ok().filter(|id| !id.is_empty())
}

fn default_api_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE_URL).expect("default API base URL is valid")
}

/// Alert latency is bounded by this interval, keep it under two seconds.
fn default_poll_interval() -> Duration {
    Duration::from_millis(1000)
}

fn default_command_poll_interval() -> Duration {
    Duration::from_millis(2000)
}

fn default_command_prefix() -> String {
    "!".to_string()
}

#[cfg(test)]
mod tests {
    use config::Config;

    use super::*;

    fn parse(yaml: &str) -> RelayConfig {
        Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize::<RelayConfig>()
            .unwrap()
    }

    #[test]
    fn test_default_relay_config() {
        let config = parse("");
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.command_poll_interval, Duration::from_millis(2000));
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_custom_relay_config() {
        let config = parse(
            r#"
            token: "abc"
            channel_id: "123456"
            api_base_url: "http://127.0.0.1:9999/api"
            poll_interval_ms: 250
            command_poll_interval_ms: 500
            command_prefix: "/"
            "#,
        );
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.channel_id.as_deref(), Some("123456"));
        assert_eq!(config.api_base_url.as_str(), "http://127.0.0.1:9999/api/");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.command_poll_interval, Duration::from_millis(500));
        assert_eq!(config.command_prefix, "/");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = parse(r#"token: "very-secret-token""#);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
