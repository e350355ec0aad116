//! The single-entry alert queue consumer.

use std::sync::Arc;

use crate::{
    models::AlertQueueEntry,
    persistence::{StateKey, StateStore},
};

/// Dequeues alerts written by the controller.
///
/// Every poll that finds the queue file removes it, whether or not its
/// contents parse. A malformed entry is logged and dropped so it cannot wedge
/// the queue.
pub struct AlertQueueConsumer {
    store: Arc<dyn StateStore>,
}

impl AlertQueueConsumer {
    /// Creates a consumer reading from `store`.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Takes the pending alert, if any.
    pub async fn poll(&self) -> Option<AlertQueueEntry> {
        let bytes = match self.store.take(StateKey::AlertQueue).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(key = %StateKey::AlertQueue, error = %e, "Failed to dequeue alert.");
                return None;
            }
        };

        match serde_json::from_slice::<AlertQueueEntry>(&bytes) {
            Ok(entry) => {
                tracing::info!(
                    kind = %entry.kind,
                    priority = entry.priority.as_str(),
                    "Dequeued alert."
                );
                Some(entry)
            }
            Err(e) => {
                tracing::error!(
                    key = %StateKey::AlertQueue,
                    error = %e,
                    "Discarding malformed alert queue entry."
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        models::{AlertKind, AlertPriority},
        persistence::{InMemoryStateStore, traits::MockStateStore},
    };

    #[tokio::test]
    async fn empty_queue_yields_nothing() {
        let consumer = AlertQueueConsumer::new(Arc::new(InMemoryStateStore::new()));
        assert!(consumer.poll().await.is_none());
    }

    #[tokio::test]
    async fn entry_is_parsed_and_removed() {
        let store = Arc::new(InMemoryStateStore::new());
        store
            .write(
                StateKey::AlertQueue,
                br#"{"type":"pig_intrusion","priority":"high","message":"m","timestamp":"t"}"#
                    .to_vec(),
            )
            .await
            .unwrap();

        let consumer = AlertQueueConsumer::new(store.clone());
        let entry = consumer.poll().await.unwrap();

        assert_eq!(entry.kind, AlertKind::PigIntrusion);
        assert_eq!(entry.priority, AlertPriority::High);
        assert_eq!(entry.message.as_deref(), Some("m"));
        assert!(!store.contains(StateKey::AlertQueue).await);
        assert!(consumer.poll().await.is_none());
    }

    #[tokio::test]
    async fn malformed_entry_is_removed_and_dropped() {
        let store = Arc::new(InMemoryStateStore::new());
        store.write(StateKey::AlertQueue, b"{not json".to_vec()).await.unwrap();

        let consumer = AlertQueueConsumer::new(store.clone());
        assert!(consumer.poll().await.is_none());
        assert!(!store.contains(StateKey::AlertQueue).await);
    }

    #[tokio::test]
    async fn store_failure_skips_the_tick() {
        let mut store = MockStateStore::new();
        store.expect_take().with(eq(StateKey::AlertQueue)).times(1).returning(|key| {
            Err(crate::persistence::PersistenceError::Io {
                key,
                path: "/tmp/guardian_discord_queue.json".into(),
                source: std::io::Error::other("disk on fire"),
            })
        });

        let consumer = AlertQueueConsumer::new(Arc::new(store));
        assert!(consumer.poll().await.is_none());
    }
}
