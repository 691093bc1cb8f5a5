//! Busy window timer task

use std::time::Duration;
use tokio::{sync::mpsc::WeakUnboundedSender, time::sleep};
use tracing::debug;

use super::Message;
use crate::{state::Control, sync::Event};

/// Sleep out a busy window and report its expiry to the event loop.
///
/// The timer always fires; the loop decides whether the window it belongs
/// to is still current.
pub async fn busy_window_timer(
    duration: Duration,
    control: Control,
    generation: u64,
    events: WeakUnboundedSender<Message>,
) {
    sleep(duration).await;

    let Some(events) = events.upgrade() else {
        debug!("Event loop gone before {} busy window expired", control);
        return;
    };
    if events
        .send(Message::Event(Event::BusyExpired { control, generation }))
        .is_err()
    {
        debug!("Event loop closed, dropping {} busy expiry", control);
    }
}
