use std::time::Duration;

use tokio::time::Instant;

/// Shared process metrics for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppMetrics {
    /// The time the process started.
    pub start_time: Instant,
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self { start_time: Instant::now() }
    }
}

impl AppMetrics {
    /// Time elapsed since the process started.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
