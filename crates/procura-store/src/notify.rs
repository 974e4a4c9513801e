//! User-visible, non-blocking notifications
//!
//! Transient failures are surfaced through a [`Notifier`] instead of being
//! returned as hard errors, so the caller keeps rendering its last good data.

use serde::Serialize;
use tokio::sync::mpsc;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Informational
    Info,
    /// Degraded but usable
    Warning,
    /// Operation failed
    Error,
}

/// Message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Short title
    pub title: String,
    /// Detail
    pub message: String,
}

impl Notification {
    /// Create warning
    #[must_use]
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create error
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Sink for user notifications
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Deliver a notification; must not block
    fn notify(&self, notification: Notification);
}

/// Notifier that writes to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => {
                tracing::info!("{}: {}", notification.title, notification.message);
            }
            NotificationLevel::Warning => {
                tracing::warn!("{}: {}", notification.title, notification.message);
            }
            NotificationLevel::Error => {
                tracing::error!("{}: {}", notification.title, notification.message);
            }
        }
    }
}

/// Notifier that forwards to a channel, e.g. a UI event loop
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create notifier and its receiving end
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notification::warning("a", "1"));
        notifier.notify(Notification::error("b", "2"));

        assert_eq!(rx.try_recv().unwrap().title, "a");
        assert_eq!(rx.try_recv().unwrap().level, NotificationLevel::Error);
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify(Notification::warning("a", "1"));
    }

    #[test]
    fn mock_notifier_sees_warning() {
        let mut mock = MockNotifier::new();
        mock.expect_notify()
            .withf(|n| n.level == NotificationLevel::Warning && n.title == "offices")
            .times(1)
            .return_const(());

        mock.notify(Notification::warning("offices", "stale"));
    }
}
