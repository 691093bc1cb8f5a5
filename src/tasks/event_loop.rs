//! Event loop that owns the sidebar
//!
//! Every state change is serialized through this one task. Round-trips and
//! busy timers run as spawned tasks and report back as messages.

use std::{sync::Arc, time::Duration};
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender},
    oneshot, watch,
};
use tracing::{debug, info};

use super::busy_window_timer;
use crate::{
    client::{Command, PowerApi},
    sync::{Effect, Event, NotificationSink, Rejection, Sidebar, SidebarView, UserAction},
};

/// Messages accepted by the event loop
#[derive(Debug)]
pub enum Message {
    Event(Event),
    User {
        action: UserAction,
        reply: oneshot::Sender<Result<(), Rejection>>,
    },
}

pub struct EventLoop {
    sidebar: Sidebar,
    api: Arc<dyn PowerApi>,
    sink: Arc<dyn NotificationSink>,
    busy_window: Duration,
    events_rx: UnboundedReceiver<Message>,
    /// Weak so the loop stops once every outside handle is dropped
    events_tx: WeakUnboundedSender<Message>,
    view_tx: watch::Sender<SidebarView>,
}

impl EventLoop {
    /// Build the loop together with its message sender and view receiver
    pub fn new(
        sidebar: Sidebar,
        api: Arc<dyn PowerApi>,
        sink: Arc<dyn NotificationSink>,
        busy_window: Duration,
    ) -> (Self, UnboundedSender<Message>, watch::Receiver<SidebarView>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(sidebar.view());

        let event_loop = Self {
            sidebar,
            api,
            sink,
            busy_window,
            events_rx,
            events_tx: events_tx.downgrade(),
            view_tx,
        };
        (event_loop, events_tx, view_rx)
    }

    pub async fn run(mut self) {
        info!("Starting sidebar event loop");

        while let Some(message) = self.events_rx.recv().await {
            self.handle(message);
        }

        info!("Sidebar event loop stopped");
    }

    fn handle(&mut self, message: Message) {
        let pending_reply = match message {
            Message::Event(event) => {
                let effects = self.sidebar.handle(event);
                self.execute(effects);
                None
            }
            Message::User { action, reply } => {
                let result = match self.sidebar.act(action) {
                    Ok(effects) => {
                        self.execute(effects);
                        Ok(())
                    }
                    Err(rejection) => {
                        info!("{:?} rejected: {}", action, rejection);
                        Err(rejection)
                    }
                };
                Some((action, reply, result))
            }
        };

        // Publish before replying so callers never see the old view
        self.view_tx.send_replace(self.sidebar.view());

        if let Some((action, reply, result)) = pending_reply {
            if reply.send(result).is_err() {
                debug!("Caller stopped waiting for {:?}", action);
            }
        }
    }

    fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Send(command) => self.dispatch(command),
                Effect::ArmBusyTimer {
                    control,
                    generation,
                } => {
                    tokio::spawn(busy_window_timer(
                        self.busy_window,
                        control,
                        generation,
                        self.events_tx.clone(),
                    ));
                }
                Effect::Notify(change) => self.sink.apply(&change),
            }
        }
    }

    /// Fire-and-forget round-trip; the outcome comes back as `Completed`
    fn dispatch(&self, command: Command) {
        info!("Sending {}", command);
        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();

        tokio::spawn(async move {
            let outcome = api.send(command).await;
            let Some(events) = events.upgrade() else {
                debug!("Event loop gone before {} completed", command);
                return;
            };
            if events
                .send(Message::Event(Event::Completed { command, outcome }))
                .is_err()
            {
                debug!("Event loop closed, dropping {} completion", command);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::MockPowerApi,
        state::PowerState,
        sync::{LogSink, NotificationOptions, SessionGate},
    };
    use serde_json::{json, Value};
    use tokio::time::Instant;

    fn spawn_loop(
        api: MockPowerApi,
    ) -> (UnboundedSender<Message>, watch::Receiver<SidebarView>) {
        let sidebar = Sidebar::new(SessionGate::disabled(), NotificationOptions::default());
        let (event_loop, tx, view) = EventLoop::new(
            sidebar,
            Arc::new(api),
            Arc::new(LogSink),
            Duration::from_millis(3000),
        );
        tokio::spawn(event_loop.run());
        (tx, view)
    }

    async fn act(tx: &UnboundedSender<Message>, action: UserAction) -> Result<(), Rejection> {
        let (reply, rx) = oneshot::channel();
        tx.send(Message::User { action, reply }).unwrap();
        rx.await.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn busy_window_starts_at_ack_and_lasts_its_duration() {
        let mut api = MockPowerApi::new();
        api.expect_send().returning(|command| match command {
            Command::GetPrinterPowerState => Ok(json!({ "state": 0 })),
            Command::GetPowerManagementState => Ok(json!({ "isEnabled": true })),
            _ => Ok(Value::Null),
        });
        let (tx, mut view) = spawn_loop(api);

        tx.send(Message::Event(Event::StartupComplete)).unwrap();
        view.wait_for(|v| v.power_state == PowerState::Off && !v.power_busy && !v.management_busy)
            .await
            .unwrap();

        let started = Instant::now();
        assert_eq!(act(&tx, UserAction::TogglePower).await, Ok(()));
        view.wait_for(|v| v.power_busy).await.unwrap();
        assert!(!view.borrow().management_busy);
        assert_eq!(view.borrow().last_command, Some(Command::PowerOnPrinter));

        view.wait_for(|v| !v.power_busy).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn abort_sends_one_command() {
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let mut api = MockPowerApi::new();
        api.expect_send().times(1).returning(move |command| {
            let _ = seen_tx.send(command);
            Ok(Value::Null)
        });
        let (tx, mut view) = spawn_loop(api);

        tx.send(Message::Event(Event::Plugin(crate::events::PluginMessage {
            plugin: "powermanager".to_string(),
            data: json!({ "type": "timeout", "timeout_value": 120 }),
        })))
        .unwrap();
        view.wait_for(|v| v.notification.is_some()).await.unwrap();

        assert_eq!(act(&tx, UserAction::AbortCountdown).await, Ok(()));
        assert!(view.borrow().notification.is_none());
        assert_eq!(seen_rx.recv().await, Some(Command::AbortPowerOff));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(seen_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_pull_leaves_state_and_unlocks_controls() {
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let mut api = MockPowerApi::new();
        api.expect_send().times(2).returning(move |command| {
            let _ = seen_tx.send(command);
            Err(crate::client::ClientError::Status {
                command,
                status: 503,
            })
        });
        let (tx, mut view) = spawn_loop(api);

        tx.send(Message::Event(Event::Reconnected)).unwrap();
        assert_eq!(seen_rx.recv().await, Some(Command::GetPrinterPowerState));
        assert_eq!(seen_rx.recv().await, Some(Command::GetPowerManagementState));

        view.wait_for(|v| !v.power_busy && !v.management_busy)
            .await
            .unwrap();
        let current = view.borrow().clone();
        assert_eq!(current.power_state, PowerState::Unknown);
        assert_eq!(current.management_enabled, None);
        assert!(current.visible);
    }
}
