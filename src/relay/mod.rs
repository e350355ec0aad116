//! The notification relay: delivers dequeued alerts to the chat channel and
//! answers unlock, status and help commands posted there.

pub mod channel;
pub mod command;
pub mod discord;
mod handler;
mod listener;
mod queue;
pub mod render;

pub use channel::{ChannelError, ChatChannel, Destination, InboundMessage, OutboundMessage};
pub use command::Command;
pub use discord::DiscordChannel;
pub use handler::Relay;
pub use listener::CommandListener;
pub use queue::AlertQueueConsumer;
