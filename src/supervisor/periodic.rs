//! A named unit of work repeated on a fixed interval.

use std::{future::Future, pin::Pin, time::Duration};

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

type TickFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Runs a tick closure every `interval` until cancelled.
///
/// Ticks never overlap: a slow tick delays the next one instead of causing a
/// burst of catch-up ticks.
pub struct PeriodicTask {
    name: String,
    interval: Duration,
    tick: Box<dyn FnMut() -> TickFuture + Send>,
}

impl PeriodicTask {
    /// Creates a task that calls `tick` every `interval`.
    pub fn new<F, Fut>(name: impl Into<String>, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self { name: name.into(), interval, tick: Box::new(move || Box::pin(tick())) }
    }

    /// Starts the long-running loop. The first tick fires immediately.
    pub async fn run(mut self, cancellation_token: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(task = %self.name, interval = ?self.interval, "Periodic task started.");

        loop {
            tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => {
                    tracing::info!(task = %self.name, "Cancellation signal received, shutting down...");
                    break;
                }

                _ = interval.tick() => {
                    (self.tick)().await;
                }
            }
        }
        tracing::info!(task = %self.name, "Periodic task has shut down.");
    }
}
