use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer, de};
use url::Url;

/// Custom deserializer for Duration from milliseconds
pub fn deserialize_duration_from_ms<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = u64::deserialize(deserializer)?;
    if ms == 0 {
        return Err(de::Error::custom("interval must be greater than zero"));
    }
    Ok(Duration::from_millis(ms))
}

/// Custom serializer for Duration to milliseconds
pub fn serialize_duration_to_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Custom deserializer for a base URL. A trailing slash is added when missing
/// so that relative joins keep the last path segment.
pub fn deserialize_base_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let normalized = if raw.ends_with('/') { raw } else { format!("{raw}/") };
    Url::parse(&normalized).map_err(de::Error::custom)
}
