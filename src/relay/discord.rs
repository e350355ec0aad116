//! Discord REST implementation of [`ChatChannel`].

use std::path::Path;

use async_trait::async_trait;
use reqwest::{
    Method, RequestBuilder, Response,
    multipart::{Form, Part},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use url::Url;

use super::channel::{
    Author, ChannelError, ChatChannel, Destination, InboundMessage, OutboundMessage,
};

/// Channel type of a guild text channel.
const GUILD_TEXT: u8 = 0;

/// Number of messages fetched per poll.
const FETCH_LIMIT: u8 = 50;

#[derive(Debug, Deserialize)]
struct GuildResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    id: String,
    #[serde(rename = "type")]
    kind: u8,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    username: String,
    #[serde(default)]
    discriminator: Option<String>,
    #[serde(default)]
    bot: bool,
}

impl UserResponse {
    /// `name#1234` for legacy accounts, the bare username otherwise.
    fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(discriminator) if discriminator != "0" => {
                format!("{}#{}", self.username, discriminator)
            }
            _ => self.username.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
    channel_id: String,
    author: UserResponse,
    #[serde(default)]
    content: String,
}

impl From<MessageResponse> for InboundMessage {
    fn from(message: MessageResponse) -> Self {
        InboundMessage {
            author: Author {
                tag: message.author.tag(),
                id: message.author.id,
                bot: message.author.bot,
            },
            id: message.id,
            channel_id: message.channel_id,
            content: message.content,
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageReference<'a> {
    message_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_reference: Option<MessageReference<'a>>,
}

/// Talks to the Discord REST API with a bot token.
pub struct DiscordChannel {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    channel_id: Option<String>,
}

impl DiscordChannel {
    /// Creates a channel client.
    ///
    /// # Arguments
    /// * `token` - Bot token
    /// * `base_url` - API root, ending in `/`
    /// * `channel_id` - Fixed destination; `None` selects the first text
    ///   channel of the first guild the bot belongs to
    pub fn new(token: String, base_url: Url, channel_id: Option<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url, token, channel_id }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ChannelError> {
        let url = self.base_url.join(path)?;
        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token)))
    }

    async fn check(response: Response) -> Result<Response, ChannelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ChannelError::Api { status: status.as_u16(), body })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ChannelError> {
        let response = self.request(Method::GET, path)?.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn first_text_channel(&self) -> Result<Destination, ChannelError> {
        let guilds: Vec<GuildResponse> = self.get_json("users/@me/guilds").await?;
        let guild = guilds
            .first()
            .ok_or_else(|| ChannelError::NoDestination("bot is not in any guild".to_string()))?;

        let channels: Vec<ChannelResponse> =
            self.get_json(&format!("guilds/{}/channels", guild.id)).await?;
        channels
            .into_iter()
            .find(|channel| channel.kind == GUILD_TEXT)
            .map(|channel| Destination::new(channel.id))
            .ok_or_else(|| {
                ChannelError::NoDestination(format!("guild {} has no text channel", guild.id))
            })
    }

    async fn post_message(
        &self,
        channel_id: &str,
        message: &OutboundMessage,
        reply_to: Option<&str>,
    ) -> Result<(), ChannelError> {
        let path = format!("channels/{channel_id}/messages");
        let mut embed = message.embed.as_ref().map(serde_json::to_value).transpose()?;

        let attachment = match &message.attachment {
            Some(path) => Some(read_attachment(path).await?),
            None => None,
        };

        if let (Some(embed), Some((file_name, _))) = (embed.as_mut(), &attachment) {
            embed["image"] = json!({ "url": format!("attachment://{file_name}") });
        }

        let payload = CreateMessage {
            content: message.content.as_deref(),
            embeds: embed.into_iter().collect(),
            attachments: attachment
                .iter()
                .map(|(file_name, _)| json!({ "id": 0, "filename": file_name }))
                .collect(),
            message_reference: reply_to.map(|message_id| MessageReference { message_id }),
        };

        let request = self.request(Method::POST, &path)?;
        let request = match attachment {
            Some((file_name, bytes)) => {
                let form = Form::new()
                    .text("payload_json", serde_json::to_string(&payload)?)
                    .part("files[0]", Part::bytes(bytes).file_name(file_name));
                request.multipart(form)
            }
            None => request.json(&payload),
        };

        Self::check(request.send().await?).await?;
        Ok(())
    }
}

async fn read_attachment(path: &Path) -> Result<(String, Vec<u8>), ChannelError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ChannelError::Attachment { path: path.to_path_buf(), source })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.jpg".to_string());
    Ok((file_name, bytes))
}

#[async_trait]
impl ChatChannel for DiscordChannel {
    async fn resolve_destination(&self) -> Result<Destination, ChannelError> {
        match &self.channel_id {
            Some(channel_id) => {
                let channel: ChannelResponse =
                    self.get_json(&format!("channels/{channel_id}")).await?;
                Ok(Destination::new(channel.id))
            }
            None => self.first_text_channel().await,
        }
    }

    async fn send(
        &self,
        destination: &Destination,
        message: &OutboundMessage,
    ) -> Result<(), ChannelError> {
        self.post_message(&destination.channel_id, message, None).await
    }

    async fn reply(&self, to: &InboundMessage, message: &OutboundMessage) -> Result<(), ChannelError> {
        self.post_message(&to.channel_id, message, Some(&to.id)).await
    }

    async fn fetch_messages(
        &self,
        destination: &Destination,
        after: Option<String>,
    ) -> Result<Vec<InboundMessage>, ChannelError> {
        let mut path = format!("channels/{}/messages?limit={FETCH_LIMIT}", destination.channel_id);
        if let Some(after) = after {
            path.push_str(&format!("&after={after}"));
        }
        let messages: Vec<MessageResponse> = self.get_json(&path).await?;
        let mut messages: Vec<InboundMessage> = messages.into_iter().map(InboundMessage::from).collect();
        // Oldest first by snowflake, whatever order the API used, so the
        // caller's cursor only moves forward.
        messages.sort_by_key(|message| message.id.parse::<u64>().unwrap_or(u64::MAX));
        Ok(messages)
    }

    async fn close(&self) {
        tracing::debug!("Discord channel closed.");
    }
}

impl std::fmt::Debug for DiscordChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordChannel")
            .field("base_url", &self.base_url.as_str())
            .field("channel_id", &self.channel_id)
            .finish_non_exhaustive()
    }
}
