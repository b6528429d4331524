//! Toast-style notifications raised by a chat session.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A short, user-facing notice about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

/// Destination for session notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Discards everything.
pub struct NoopNotificationSink;

#[async_trait]
impl NotificationSink for NoopNotificationSink {
    async fn notify(&self, _: Notification) {}
}

/// Returns a no-op notification sink.
pub fn noop_sink() -> Arc<dyn NotificationSink> {
    Arc::new(NoopNotificationSink)
}

/// Emits notifications as `tracing` events.
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Success => {
                tracing::info!(title = n.title.as_str(), "{}", n.description)
            }
            NotificationLevel::Error => {
                tracing::warn!(title = n.title.as_str(), "{}", n.description)
            }
        }
    }
}

/// In-memory sink for testing.
#[derive(Default)]
pub struct InMemoryNotificationSink {
    events: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.events.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events.write().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn notify(&self, notification: Notification) {
        self.events
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_sink_records_in_order() {
        let sink = InMemoryNotificationSink::new();
        tokio_test::block_on(async {
            sink.notify(Notification::error("first")).await;
            sink.notify(Notification::success("second")).await;
        });

        let all = sink.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].level, NotificationLevel::Error);
        assert_eq!(all[0].title, "Error");
        assert_eq!(sink.last().unwrap().description, "second");

        sink.clear();
        assert!(sink.is_empty());
    }
}
