//! Operator feedback sinks and the change-event bus

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::models::event::{EngineEvent, Notification, NotificationLevel};

/// Receives success / failure feedback for operator-issued actions
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink writing notifications to the log
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("{}", notification.message),
            NotificationLevel::Failure => tracing::warn!("{}", notification.message),
        }
    }
}

/// Broadcast channel of post-mutation snapshots
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event; having no subscriber is not an error
    pub fn publish(&self, event: EngineEvent) {
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::trace!("Published engine event to {} subscriber(s)", receivers);
    }

    /// Stream of events published after this call.
    ///
    /// A subscriber that falls more than `capacity` events behind receives a
    /// `Lagged` error item and continues from the oldest retained event.
    pub fn subscribe(&self) -> BroadcastStream<EngineEvent> {
        BroadcastStream::new(self.sender.subscribe())
    }
}
