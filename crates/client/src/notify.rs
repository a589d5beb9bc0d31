//! User-visible notification surface.
//!
//! The data layer never renders anything; it emits [`Notification`] values
//! into an unbounded channel and the UI layer decides how to show them.
//! Emitting with no subscriber is a logged no-op so headless embedders
//! (tests, the CLI) can ignore the channel entirely.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

/// How long an error notification stays visible.
pub const ERROR_VISIBLE_FOR: Duration = Duration::from_millis(8000);

/// Screen edge a notification is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Bottom,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short heading.
    pub title: String,
    /// Detail line, usually an error message.
    pub body: String,
    /// Where the toast appears.
    pub anchor: Anchor,
    /// How long it stays on screen.
    pub visible_for: Duration,
}

impl Notification {
    /// The standard failure surface: title `"Error"`, bottom anchor,
    /// visible for eight seconds.
    #[must_use]
    pub fn error(body: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            body: body.into(),
            anchor: Anchor::Bottom,
            visible_for: ERROR_VISIBLE_FOR,
        }
    }
}

/// Sending half of the notification channel.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier and the receiver the UI layer consumes.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Emit a notification. Dropped silently if nobody is listening.
    pub fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("notification dropped, no subscriber");
        }
    }
}
