//! User-visible notifications (toasts)

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn success(body: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(body: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Fire-and-forget notification channel
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that writes every notification to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                tracing::info!(title = %notification.title, "{}", notification.body)
            }
            Severity::Error => {
                tracing::error!(title = %notification.title, "{}", notification.body)
            }
        }
    }
}
