//! `guardian relay`: delivers alerts to the chat channel and answers
//! commands posted there.

use std::sync::Arc;

use clap::Parser;

use super::Error;
use crate::{
    context::AppContextBuilder,
    relay::{ChatChannel, DiscordChannel},
    supervisor::{Supervisor, SupervisorError},
};

/// Arguments of the `relay` subcommand.
#[derive(Parser, Debug, Default)]
pub struct RelayArgs {
    /// Destination channel id, overriding configuration.
    #[arg(long)]
    pub channel_id: Option<String>,
}

/// Runs the relay until a shutdown signal arrives.
pub async fn execute(config_dir: Option<String>, args: RelayArgs) -> Result<(), Error> {
    let mut context = AppContextBuilder::new(config_dir).build()?;
    if args.channel_id.is_some() {
        context.config.relay.channel_id = args.channel_id;
    }

    let relay_config = &context.config.relay;
    let token = relay_config.token.clone().ok_or(SupervisorError::MissingToken)?;
    let channel: Arc<dyn ChatChannel> = Arc::new(DiscordChannel::new(
        token,
        relay_config.api_base_url.clone(),
        relay_config.channel_id.clone(),
    ));
    tracing::info!(
        channel_id = relay_config.channel_id.as_deref().unwrap_or("<first available>"),
        alert_queue = %context.config.state.alert_queue.display(),
        "Chat channel initialized."
    );

    let supervisor = Supervisor::builder()
        .config(context.config)
        .store(context.store)
        .statuses(context.statuses)
        .event_log(context.event_log)
        .channel(channel)
        .build_relay()?;

    tracing::info!("Supervisor initialized, starting relay...");
    supervisor.run().await?;
    Ok(())
}
