//! This module provides the `SupervisorBuilder` for constructing a `Supervisor`.

use std::sync::Arc;

use tokio::net::TcpListener;

use super::{PeriodicTask, Service, Supervisor, SupervisorError};
use crate::{
    config::AppConfig,
    context::AppMetrics,
    http_server::{self, ApiState},
    persistence::{EventLog, StateStore, StatusRepository},
    relay::{AlertQueueConsumer, ChatChannel, CommandListener, Relay},
};

/// A builder for creating a `Supervisor` instance.
#[derive(Default)]
pub struct SupervisorBuilder {
    config: Option<AppConfig>,
    store: Option<Arc<dyn StateStore>>,
    statuses: Option<StatusRepository>,
    event_log: Option<Arc<EventLog>>,
    channel: Option<Arc<dyn ChatChannel>>,
    app_metrics: Option<AppMetrics>,
    listener: Option<TcpListener>,
}

impl SupervisorBuilder {
    /// Creates a new, empty `SupervisorBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application configuration for the `Supervisor`.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the state store shared with the other processes.
    pub fn store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Shares an existing status repository. Defaults to one over the store.
    pub fn statuses(mut self, statuses: StatusRepository) -> Self {
        self.statuses = Some(statuses);
        self
    }

    /// Shares an existing event log. Defaults to one over the store.
    pub fn event_log(mut self, event_log: Arc<EventLog>) -> Self {
        self.event_log = Some(event_log);
        self
    }

    /// Sets the chat channel the relay talks through.
    pub fn channel(mut self, channel: Arc<dyn ChatChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Sets the process metrics. Defaults to metrics started now.
    pub fn app_metrics(mut self, app_metrics: AppMetrics) -> Self {
        self.app_metrics = Some(app_metrics);
        self
    }

    /// Uses an already bound listener instead of binding
    /// `server.listen_address`.
    pub fn listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Wires the relay: the alert queue consumer and the command listener,
    /// both sharing one [`Relay`].
    pub fn build_relay(self) -> Result<Supervisor, SupervisorError> {
        let config = self.config.ok_or(SupervisorError::MissingConfig)?;
        let store = self.store.ok_or(SupervisorError::MissingStateStore)?;
        let channel = self.channel.ok_or(SupervisorError::MissingChannel)?;

        let statuses = self.statuses.unwrap_or_else(|| StatusRepository::new(Arc::clone(&store)));
        let event_log = self.event_log.unwrap_or_else(|| Arc::new(EventLog::new(Arc::clone(&store))));

        let relay = Arc::new(Relay::new(
            Arc::clone(&channel),
            statuses,
            event_log,
            config.unlock_secret.clone(),
            config.relay.command_prefix.clone(),
        ));

        let consumer = Arc::new(AlertQueueConsumer::new(Arc::clone(&store)));
        let delivering = Arc::clone(&relay);
        let queue_task =
            PeriodicTask::new("alert_queue", config.relay.poll_interval, move || {
                let consumer = Arc::clone(&consumer);
                let relay = Arc::clone(&delivering);
                async move {
                    if let Some(entry) = consumer.poll().await {
                        relay.deliver_alert(&entry).await;
                    }
                }
            });

        let listener = Arc::new(CommandListener::new(relay));
        let command_task =
            PeriodicTask::new("command_listener", config.relay.command_poll_interval, move || {
                let listener = Arc::clone(&listener);
                async move {
                    listener.poll().await;
                }
            });

        tracing::info!(
            poll_interval = ?config.relay.poll_interval,
            command_poll_interval = ?config.relay.command_poll_interval,
            "Relay services wired."
        );
        Ok(Supervisor::new(
            vec![Service::Periodic(queue_task), Service::Periodic(command_task)],
            Some(channel),
        ))
    }

    /// Wires the dashboard HTTP server, binding its listener.
    pub async fn build_dashboard(self) -> Result<Supervisor, SupervisorError> {
        let config = self.config.ok_or(SupervisorError::MissingConfig)?;
        let store = self.store.ok_or(SupervisorError::MissingStateStore)?;

        let listener = match self.listener {
            Some(listener) => listener,
            None => http_server::bind(&config).await?,
        };
        let state = ApiState {
            config: Arc::new(config),
            statuses: self.statuses.unwrap_or_else(|| StatusRepository::new(Arc::clone(&store))),
            event_log: self.event_log.unwrap_or_else(|| Arc::new(EventLog::new(store))),
            app_metrics: self.app_metrics.unwrap_or_default(),
        };

        Ok(Supervisor::new(vec![Service::Dashboard { listener, state }], None))
    }
}
