//! User-facing notification channel.
//!
//! The provider never renders anything itself. It emits [`Notification`]s on
//! an unbounded channel and the presentation layer (CLI, UI) drains the
//! receiver.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warn"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

/// Sending half of the notification channel.
///
/// Sending never fails from the caller's point of view: if the receiver is
/// gone the notification is dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Option<mpsc::UnboundedSender<Notification>>,
}

impl Notifier {
    /// Create a notifier and the receiver the presentation layer drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A notifier that only logs.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.emit(Level::Info, title.into(), description.into());
    }

    pub fn warn(&self, title: impl Into<String>, description: impl Into<String>) {
        self.emit(Level::Warn, title.into(), description.into());
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.emit(Level::Error, title.into(), description.into());
    }

    fn emit(&self, level: Level, title: String, description: String) {
        tracing::debug!(%level, title = %title, description = %description, "Notification");

        if let Some(tx) = &self.tx {
            let _ = tx.send(Notification {
                level,
                title,
                description,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notifications_delivered_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.info("+5 points", "You now have 5 points.");
        notifier.error("Mint failed", "execution reverted");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.level, Level::Info);
        assert_eq!(first.title, "+5 points");

        let second = rx.recv().await.unwrap();
        assert_eq!(second.level, Level::Error);
        assert_eq!(second.description, "execution reverted");
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.warn("Wrong network", "ignored");
        Notifier::disabled().info("nothing", "listens");
    }
}
