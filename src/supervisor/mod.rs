//! The Supervisor module manages the lifecycle of a Guardian process.
//!
//! Both the relay and the dashboard run under a `Supervisor`. It owns every
//! long-running service of the process, listens for shutdown signals (Ctrl+C
//! or SIGTERM) and tears the services down together. If a service panics or
//! stops unexpectedly the whole process shuts down rather than continuing in a
//! partially-functional state.

mod builder;
mod periodic;

use std::sync::Arc;

pub use builder::SupervisorBuilder;
pub use periodic::PeriodicTask;
use thiserror::Error;
use tokio::{net::TcpListener, signal, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{
    http_server::{self, ApiState, ServerError},
    relay::ChatChannel,
};

/// Represents the set of errors that can occur while assembling or running
/// the supervisor.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A required configuration was not provided to the `SupervisorBuilder`.
    #[error("Missing configuration for Supervisor")]
    MissingConfig,

    /// A state store was not provided to the `SupervisorBuilder`.
    #[error("Missing state store for Supervisor")]
    MissingStateStore,

    /// A chat channel was not provided to the `SupervisorBuilder`.
    #[error("Missing chat channel for Supervisor")]
    MissingChannel,

    /// The relay has no bot token to authenticate with.
    #[error("Missing bot token: set DISCORD_TOKEN or relay.token")]
    MissingToken,

    /// The dashboard server could not be started.
    #[error("HTTP server error: {0}")]
    Server(#[from] ServerError),
}

/// A service owned by the supervisor.
enum Service {
    Periodic(PeriodicTask),
    Dashboard { listener: TcpListener, state: ApiState },
}

/// The primary runtime manager for a process.
pub struct Supervisor {
    /// Services started by `run`.
    services: Vec<Service>,

    /// Closed once on shutdown, if the process talks to a chat channel.
    channel: Option<Arc<dyn ChatChannel>>,

    /// A token used to signal a shutdown to all supervised tasks.
    cancellation_token: CancellationToken,

    /// A set of all spawned tasks that the supervisor is actively managing.
    join_set: JoinSet<()>,
}

impl Supervisor {
    fn new(services: Vec<Service>, channel: Option<Arc<dyn ChatChannel>>) -> Self {
        Self {
            services,
            channel,
            cancellation_token: CancellationToken::new(),
            join_set: JoinSet::new(),
        }
    }

    /// Returns a new `SupervisorBuilder` instance.
    pub fn builder() -> SupervisorBuilder {
        SupervisorBuilder::new()
    }

    /// A token that stops the supervisor when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Starts every service and blocks until shutdown.
    ///
    /// Shutdown is triggered by SIGINT/SIGTERM, by cancelling
    /// [`Supervisor::cancellation_token`], or by a service failing. In-flight
    /// work is aborted, not awaited.
    pub async fn run(mut self) -> Result<(), SupervisorError> {
        let cancellation_token = self.cancellation_token.clone();
        self.join_set.spawn(async move {
            tokio::select! {
                _ = shutdown_signal() => cancellation_token.cancel(),
                _ = cancellation_token.cancelled() => {}
            }
        });

        for service in std::mem::take(&mut self.services) {
            let token = self.cancellation_token.clone();
            match service {
                Service::Periodic(task) => {
                    self.join_set.spawn(task.run(token));
                }
                Service::Dashboard { listener, state } => {
                    self.join_set.spawn(async move {
                        tokio::select! {
                            result = http_server::serve(listener, state) => {
                                if let Err(e) = result {
                                    tracing::error!(error = %e, "HTTP server stopped.");
                                }
                                token.cancel();
                            }
                            _ = token.cancelled() => {
                                tracing::info!("HTTP server received shutdown signal.");
                            }
                        }
                    });
                }
            }
        }

        loop {
            tokio::select! {
                maybe_result = self.join_set.join_next() => {
                    match maybe_result {
                        Some(Ok(())) => {}
                        Some(Err(e)) => {
                            tracing::error!("A critical task failed: {:?}. Initiating shutdown.", e);
                            self.cancellation_token.cancel();
                        }
                        None => break,
                    }
                }
                _ = self.cancellation_token.cancelled() => break,
            }
        }

        self.join_set.shutdown().await;
        tracing::info!("All supervised tasks have stopped.");

        if let Some(channel) = &self.channel {
            channel.close().await;
        }

        tracing::info!("Supervisor shutdown complete.");
        Ok(())
    }
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT.");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to register SIGTERM handler.");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT (Ctrl+C) received, shutting down."),
        _ = terminate => tracing::info!("SIGTERM received, shutting down."),
    }
}
