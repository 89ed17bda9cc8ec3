//! User-facing notices (the toast presenter collaborator)

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn warning<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Presents notices to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Routes notices through tracing and stdout
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!("{}", notification.message),
            NotificationKind::Warning => warn!("{}", notification.message),
            NotificationKind::Error => error!("{}", notification.message),
        }
        println!("[{}] {}", notification.kind, notification.message);
    }
}

/// Keeps every notice for later inspection
#[cfg(test)]
#[derive(Default)]
pub struct MemoryNotifier {
    seen: std::sync::Mutex<Vec<Notification>>,
}

#[cfg(test)]
impl MemoryNotifier {
    pub fn take(&self) -> Vec<Notification> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}
