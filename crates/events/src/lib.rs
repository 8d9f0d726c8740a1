//! User-facing notifications for the site-management module.
//!
//! - [`Notification`]: message, severity and optional auto-dismiss delay.
//! - [`Notifier`]: the contract the sync layer reports through.
//! - [`NotificationBus`]: in-process fan-out backed by
//!   `tokio::sync::broadcast`, for presentation layers that render toasts.

pub mod bus;
pub mod notification;

pub use bus::NotificationBus;
pub use notification::{Notification, Notifier, RecordingNotifier, Severity};
