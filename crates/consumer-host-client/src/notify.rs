/*
[INPUT]:  Server errors surfaced while the alert flag is on
[OUTPUT]: Transient user-facing notifications
[POS]:    Presentation seam - how failures reach the user
[UPDATE]: When adding notification sinks
*/

use std::time::Duration;

use tracing::warn;

use crate::types::ServiceError;

const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// A transient error message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub description: String,
    pub duration: Duration,
}

impl Notification {
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            duration: DEFAULT_DURATION,
        }
    }
}

impl From<&ServiceError> for Notification {
    fn from(err: &ServiceError) -> Self {
        Notification::error(err.error.clone())
    }
}

/// Sink for transient notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Default notifier: emits notifications as log events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        warn!(
            description = %notification.description,
            duration_ms = notification.duration.as_millis() as u64,
            "notification"
        );
    }
}
