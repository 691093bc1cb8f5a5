//! Shared handle to the running sidebar

use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;
use tokio::sync::{mpsc::UnboundedSender, oneshot, watch};
use tracing::debug;

use crate::{
    client::PowerApi,
    sync::{Event, NotificationSink, Rejection, Sidebar, SidebarView, UserAction},
    tasks::{EventLoop, Message},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("sidebar event loop is not running")]
    LoopClosed,
}

/// Cheap to clone; every clone talks to the same event loop
#[derive(Debug, Clone)]
pub struct AppState {
    events_tx: UnboundedSender<Message>,
    view_rx: watch::Receiver<SidebarView>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        events_tx: UnboundedSender<Message>,
        view_rx: watch::Receiver<SidebarView>,
    ) -> Self {
        Self {
            events_tx,
            view_rx,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Spawn the event loop for `sidebar` and return a handle to it.
    ///
    /// Must be called from within a tokio runtime. The loop stops once the
    /// returned handle and all its clones are dropped.
    pub fn start(
        sidebar: Sidebar,
        api: Arc<dyn PowerApi>,
        sink: Arc<dyn NotificationSink>,
        busy_window: Duration,
        port: u16,
        host: String,
    ) -> Self {
        let (event_loop, events_tx, view_rx) = EventLoop::new(sidebar, api, sink, busy_window);
        tokio::spawn(event_loop.run());
        Self::new(port, host, events_tx, view_rx)
    }

    /// Queue an event for the loop without waiting for it to be handled
    pub fn post(&self, event: Event) -> Result<(), StateError> {
        debug!("Posting {:?}", event);
        self.events_tx
            .send(Message::Event(event))
            .map_err(|_| StateError::LoopClosed)
    }

    /// Run a user action and wait for the sidebar's verdict
    pub async fn act(&self, action: UserAction) -> Result<Result<(), Rejection>, StateError> {
        let (reply, verdict) = oneshot::channel();
        self.events_tx
            .send(Message::User { action, reply })
            .map_err(|_| StateError::LoopClosed)?;
        verdict.await.map_err(|_| StateError::LoopClosed)
    }

    /// Latest published view
    pub fn view(&self) -> SidebarView {
        self.view_rx.borrow().clone()
    }

    /// Receiver that is notified whenever the view is republished
    pub fn subscribe(&self) -> watch::Receiver<SidebarView> {
        self.view_rx.clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
