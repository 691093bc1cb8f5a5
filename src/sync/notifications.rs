//! Countdown notification lifecycle
//!
//! Owns the single "Power Saver Mode" notification. The notification is
//! created on the first positive `timeout`, retitled in place on later
//! ones, and torn down by a non-positive `timeout`, a server `cancel`, the
//! user's Abort, or a command that supersedes the countdown.

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::Countdown;

/// A button on the notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub label: String,
    pub classes: String,
}

/// Presentation settings shared by every notification a manager creates.
///
/// The host widget normally adds its own cancel button to confirm-style
/// notices. These options carry only the Abort action, so instances built
/// from them have exactly one interactive control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationOptions {
    pub title: String,
    pub text_prefix: String,
    pub abort: NotificationAction,
    pub closer: bool,
    pub sticker: bool,
    pub history: bool,
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self {
            title: "Power Saver Mode".to_string(),
            text_prefix: "...in ".to_string(),
            abort: NotificationAction {
                label: "Abort".to_string(),
                classes: "btn-block btn-danger".to_string(),
            },
            closer: false,
            sticker: false,
            history: false,
        }
    }
}

/// One rendered countdown notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub remaining_seconds: u64,
    pub actions: Vec<NotificationAction>,
    pub closer: bool,
    pub sticker: bool,
    pub history: bool,
}

/// What the host widget has to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationChange {
    Show(Notification),
    Update(Notification),
    Remove(Uuid),
}

/// Host notification widget
pub trait NotificationSink: Send + Sync {
    fn apply(&self, change: &NotificationChange);
}

/// Sink for hosts that poll the sidebar view instead of rendering pushes
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn apply(&self, change: &NotificationChange) {
        match change {
            NotificationChange::Show(n) => info!("Showing notification {}: {}", n.id, n.text),
            NotificationChange::Update(n) => debug!("Updating notification {}: {}", n.id, n.text),
            NotificationChange::Remove(id) => info!("Removing notification {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Idle,
    Showing(Notification),
}

#[derive(Debug)]
pub struct NotificationManager {
    options: NotificationOptions,
    slot: Slot,
}

impl NotificationManager {
    pub fn new(options: NotificationOptions) -> Self {
        Self {
            options,
            slot: Slot::Idle,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        match &self.slot {
            Slot::Idle => None,
            Slot::Showing(notification) => Some(notification),
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self.slot, Slot::Showing(_))
    }

    /// Handle a `timeout` push
    pub fn on_timeout(&mut self, timeout_value: Option<i64>) -> Option<NotificationChange> {
        let Some(countdown) = timeout_value.and_then(Countdown::from_seconds) else {
            return self.teardown("countdown elapsed");
        };

        let text = format!("{}{}", self.options.text_prefix, countdown.remaining_text());
        if let Slot::Showing(notification) = &mut self.slot {
            notification.text = text;
            notification.remaining_seconds = countdown.remaining_seconds();
            return Some(NotificationChange::Update(notification.clone()));
        }

        let notification = self.build(text, countdown);
        info!(
            "Shutdown countdown started: {}s remaining",
            countdown.remaining_seconds()
        );
        self.slot = Slot::Showing(notification.clone());
        Some(NotificationChange::Show(notification))
    }

    /// Handle a server `cancel` push
    pub fn on_cancel(&mut self) -> Option<NotificationChange> {
        self.teardown("cancelled by server")
    }

    /// The user pressed Abort.
    ///
    /// `Some` means the notification was removed and the caller must send
    /// `abort_power_off` in the same step.
    pub fn abort(&mut self) -> Option<NotificationChange> {
        self.teardown("aborted by user")
    }

    /// Remove the countdown because a command made it moot
    pub fn dismiss(&mut self) -> Option<NotificationChange> {
        self.teardown("superseded")
    }

    fn build(&self, text: String, countdown: Countdown) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            title: self.options.title.clone(),
            text,
            remaining_seconds: countdown.remaining_seconds(),
            actions: vec![self.options.abort.clone()],
            closer: self.options.closer,
            sticker: self.options.sticker,
            history: self.options.history,
        }
    }

    fn teardown(&mut self, reason: &str) -> Option<NotificationChange> {
        match std::mem::replace(&mut self.slot, Slot::Idle) {
            Slot::Showing(notification) => {
                info!("Shutdown countdown removed ({})", reason);
                Some(NotificationChange::Remove(notification.id))
            }
            Slot::Idle => {
                debug!("No countdown to remove ({})", reason);
                None
            }
        }
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(NotificationOptions::default())
    }
}
