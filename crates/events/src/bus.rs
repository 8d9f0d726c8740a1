//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] implements [`Notifier`] so the sync layer can publish
//! into it, while any number of UI components subscribe independently.
//! Share it via `Arc<NotificationBus>`.

use tokio::sync::broadcast;

use crate::notification::{Notification, Notifier};

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out of [`Notification`]s.
///
/// # Usage
///
/// ```rust
/// use sitebook_events::{Notification, NotificationBus, Notifier};
///
/// let bus = NotificationBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.notify(Notification::success("Project saved"));
/// ```
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread notifications are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier for NotificationBus {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            severity = ?notification.severity,
            message = %notification.message,
            "Publishing notification",
        );
        // A send error only means nobody is listening.
        let _ = self.sender.send(notification);
    }
}
