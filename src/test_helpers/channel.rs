use std::sync::Mutex;

use async_trait::async_trait;

use crate::relay::{ChannelError, ChatChannel, Destination, InboundMessage, OutboundMessage};

/// A message captured by [`RecordingChannel`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    /// Channel the message went to.
    pub channel_id: String,
    /// Id of the message replied to, if this was a reply.
    pub reply_to: Option<String>,
    /// The message.
    pub message: OutboundMessage,
}

/// An in-memory [`ChatChannel`] that records what is sent and serves queued
/// inbound messages.
pub struct RecordingChannel {
    destination: Option<Destination>,
    sent: Mutex<Vec<SentMessage>>,
    inbox: Mutex<Vec<InboundMessage>>,
    fail_sends: bool,
    closed: Mutex<bool>,
}

impl RecordingChannel {
    /// A channel whose destination resolves to `channel_id`.
    pub fn new(channel_id: &str) -> Self {
        Self {
            destination: Some(Destination::new(channel_id)),
            sent: Mutex::new(Vec::new()),
            inbox: Mutex::new(Vec::new()),
            fail_sends: false,
            closed: Mutex::new(false),
        }
    }

    /// A channel with no reachable destination.
    pub fn unreachable() -> Self {
        Self { destination: None, ..Self::new("") }
    }

    /// A channel that rejects every send and reply.
    pub fn failing(channel_id: &str) -> Self {
        Self { fail_sends: true, ..Self::new(channel_id) }
    }

    /// Queues an inbound message for the next fetch.
    pub fn push_inbound(&self, message: InboundMessage) {
        self.inbox.lock().unwrap().push(message);
    }

    /// Everything sent or replied so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Whether `close` was called.
    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }

    fn record(
        &self,
        channel_id: &str,
        reply_to: Option<&str>,
        message: &OutboundMessage,
    ) -> Result<(), ChannelError> {
        if self.fail_sends {
            return Err(ChannelError::Api { status: 503, body: "unavailable".to_string() });
        }
        self.sent.lock().unwrap().push(SentMessage {
            channel_id: channel_id.to_string(),
            reply_to: reply_to.map(str::to_string),
            message: message.clone(),
        });
        Ok(())
    }
}

#[async_trait]
impl ChatChannel for RecordingChannel {
    async fn resolve_destination(&self) -> Result<Destination, ChannelError> {
        self.destination
            .clone()
            .ok_or_else(|| ChannelError::NoDestination("no destination configured".to_string()))
    }

    async fn send(
        &self,
        destination: &Destination,
        message: &OutboundMessage,
    ) -> Result<(), ChannelError> {
        self.record(&destination.channel_id, None, message)
    }

    async fn reply(
        &self,
        to: &InboundMessage,
        message: &OutboundMessage,
    ) -> Result<(), ChannelError> {
        self.record(&to.channel_id, Some(&to.id), message)
    }

    async fn fetch_messages(
        &self,
        _destination: &Destination,
        after: Option<String>,
    ) -> Result<Vec<InboundMessage>, ChannelError> {
        let inbox = self.inbox.lock().unwrap();
        let after = after.and_then(|id| id.parse::<u64>().ok());
        Ok(inbox
            .iter()
            .filter(|message| match (after, message.id.parse::<u64>()) {
                (Some(after), Ok(id)) => id > after,
                _ => true,
            })
            .cloned()
            .collect())
    }

    async fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }
}
