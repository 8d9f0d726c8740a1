use std::str::FromStr;
use std::time::Duration;

use sitebook_events::bus::DEFAULT_CAPACITY;
use sitebook_events::{Notification, NotificationBus, Severity};

/// Notification timing for the sync layer.
///
/// All fields have defaults suitable for an interactive client. Override via
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Auto-dismiss delay for success toasts (default: 3 s).
    pub success_dismiss: Duration,
    /// Auto-dismiss delay for warnings (default: 5 s).
    pub warning_dismiss: Duration,
    /// Auto-dismiss delay for errors. Zero keeps the toast until the user
    /// closes it (default).
    pub error_dismiss: Duration,
    /// Buffered notifications per [`NotificationBus`] subscriber (default: 256).
    pub notification_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            success_dismiss: Duration::from_millis(3_000),
            warning_dismiss: Duration::from_millis(5_000),
            error_dismiss: Duration::ZERO,
            notification_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl SyncConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default |
    /// |----------------------------------|---------|
    /// | `SITEBOOK_NOTIFY_SUCCESS_MS`     | `3000`  |
    /// | `SITEBOOK_NOTIFY_WARNING_MS`     | `5000`  |
    /// | `SITEBOOK_NOTIFY_ERROR_MS`       | `0`     |
    /// | `SITEBOOK_NOTIFICATION_CAPACITY` | `256`   |
    ///
    /// Unparseable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            success_dismiss: millis_var("SITEBOOK_NOTIFY_SUCCESS_MS", defaults.success_dismiss),
            warning_dismiss: millis_var("SITEBOOK_NOTIFY_WARNING_MS", defaults.warning_dismiss),
            error_dismiss: millis_var("SITEBOOK_NOTIFY_ERROR_MS", defaults.error_dismiss),
            notification_capacity: env_or(
                "SITEBOOK_NOTIFICATION_CAPACITY",
                defaults.notification_capacity,
            ),
        }
    }

    /// Read a `.env` file if present, then [`from_env`](Self::from_env).
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_env()
    }

    pub fn dismiss_after(&self, severity: Severity) -> Duration {
        match severity {
            Severity::Success | Severity::Info => self.success_dismiss,
            Severity::Warning => self.warning_dismiss,
            Severity::Error => self.error_dismiss,
        }
    }

    /// A notification carrying this config's delay for `severity`.
    pub fn notification(&self, severity: Severity, message: impl Into<String>) -> Notification {
        Notification::new(severity, message).with_auto_dismiss(self.dismiss_after(severity))
    }

    pub fn notification_bus(&self) -> NotificationBus {
        NotificationBus::new(self.notification_capacity)
    }
}

fn millis_var(key: &str, default: Duration) -> Duration {
    Duration::from_millis(env_or(key, default.as_millis() as u64))
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
