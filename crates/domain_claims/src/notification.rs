//! Operator notifications
//!
//! Every remote outcome is reported to the operator exactly once through a
//! [`NotificationSink`]. Sinks are fire-and-forget: the wizard never waits on
//! them and never learns whether the message was displayed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(name)
    }
}

/// A message for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success", message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message, Severity::Error)
    }

    /// A warning shown under an informational title
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new("Info", message, Severity::Warning)
    }
}

/// Destination for operator notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that writes notifications to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        let Notification { title, message, severity } = notification;
        match severity {
            Severity::Success | Severity::Info => {
                tracing::info!(%severity, %title, "{message}");
            }
            Severity::Warning => tracing::warn!(%severity, %title, "{message}"),
            Severity::Error => tracing::error!(%severity, %title, "{message}"),
        }
    }
}

/// Sink that keeps every notification in memory
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Debug, Default)]
    pub struct RecordingNotificationSink {
        received: Mutex<Vec<Notification>>,
    }

    impl RecordingNotificationSink {
        pub fn new() -> Self {
            Self::default()
        }

        fn received(&self) -> MutexGuard<'_, Vec<Notification>> {
            self.received.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// All notifications received so far, oldest first
        pub fn notifications(&self) -> Vec<Notification> {
            self.received().clone()
        }

        pub fn last(&self) -> Option<Notification> {
            self.received().last().cloned()
        }

        pub fn len(&self) -> usize {
            self.received().len()
        }

        pub fn is_empty(&self) -> bool {
            self.received().is_empty()
        }

        pub fn clear(&self) {
            self.received().clear();
        }
    }

    impl NotificationSink for RecordingNotificationSink {
        fn notify(&self, notification: Notification) {
            self.received().push(notification);
        }
    }
}
