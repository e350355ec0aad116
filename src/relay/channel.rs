//! The messaging channel the relay talks through.

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

/// Where outbound messages go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Channel identifier on the messaging platform.
    pub channel_id: String,
}

impl Destination {
    /// Creates a destination for `channel_id`.
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self { channel_id: channel_id.into() }
    }
}

/// A name/value pair shown inside an embed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    /// Field label.
    pub name: String,
    /// Field content.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

/// A rich message card.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Embed {
    /// Headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Side bar colour as `0xRRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// RFC 3339 timestamp shown in the footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Name/value pairs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    /// Footer text.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_footer")]
    pub footer: Option<String>,
}

fn serialize_footer<S: serde::Serializer>(footer: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Footer<'a> {
        text: &'a str,
    }
    match footer {
        Some(text) => serializer.serialize_some(&Footer { text }),
        None => serializer.serialize_none(),
    }
}

impl Embed {
    /// Adds a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField { name: name.into(), value: value.into(), inline });
        self
    }
}

/// A message to send or reply with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutboundMessage {
    /// Plain text content.
    pub content: Option<String>,
    /// Optional rich card.
    pub embed: Option<Embed>,
    /// Optional file to upload and show inside the embed.
    pub attachment: Option<PathBuf>,
}

impl OutboundMessage {
    /// A plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }

    /// A message made of a single embed.
    pub fn embed(embed: Embed) -> Self {
        Self { embed: Some(embed), ..Default::default() }
    }
}

/// The author of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Platform user id.
    pub id: String,
    /// Display tag.
    pub tag: String,
    /// Whether the author is an automated account.
    pub bot: bool,
}

/// A message observed on the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Platform message id. Ids increase over time.
    pub id: String,
    /// Channel the message was posted in.
    pub channel_id: String,
    /// Who posted it.
    pub author: Author,
    /// Raw text.
    pub content: String,
}

/// Errors raised by a [`ChatChannel`].
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No destination could be resolved.
    #[error("No destination available: {0}")]
    NoDestination(String),

    /// The transport failed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// An attachment could not be read.
    #[error("Failed to read attachment {path}: {source}")]
    Attachment {
        /// Attachment path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A payload could not be encoded.
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Message send/receive interface of the external messaging platform.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Picks where alerts go: the configured destination, or the first one
    /// available to the bot.
    async fn resolve_destination(&self) -> Result<Destination, ChannelError>;

    /// Posts `message` to `destination`.
    async fn send(&self, destination: &Destination, message: &OutboundMessage) -> Result<(), ChannelError>;

    /// Posts `message` as a reply to `to`.
    async fn reply(&self, to: &InboundMessage, message: &OutboundMessage) -> Result<(), ChannelError>;

    /// Messages posted to `destination` after the message id `after`, oldest
    /// first. With no cursor, returns the most recent messages.
    async fn fetch_messages(
        &self,
        destination: &Destination,
        after: Option<String>,
    ) -> Result<Vec<InboundMessage>, ChannelError>;

    /// Releases the connection. Called once on shutdown.
    async fn close(&self);
}
