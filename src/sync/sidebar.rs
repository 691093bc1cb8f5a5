//! The power sidebar state machine
//!
//! Composes the session gate, reconciler, dispatcher and notification
//! manager. It performs no I/O: every input is an [`Event`] or a
//! [`UserAction`], and everything the outside world must do comes back as
//! a list of [`Effect`]s.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    CommandDispatcher, Notification, NotificationChange, NotificationManager, NotificationOptions,
    PowerReconciler, Rejection, SessionGate, SessionTransition,
};
use crate::client::{ClientError, Command};
use crate::events::{PluginMessage, PushEvent, DEFAULT_PLUGIN};
use crate::state::{Control, PowerState};

/// Inputs from the host, the server and the sidebar's own timers
#[derive(Debug)]
pub enum Event {
    /// Host session transition
    Session { logged_in: bool },
    /// Host finished activating the sidebar
    StartupComplete,
    /// Host push channel reconnected
    Reconnected,
    /// Push message from the server
    Plugin(PluginMessage),
    /// A pull or command round-trip finished
    Completed {
        command: Command,
        outcome: Result<Value, ClientError>,
    },
    /// A busy window's timer fired
    BusyExpired { control: Control, generation: u64 },
}

/// Sidebar affordances a user can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    TogglePower,
    ToggleManagement,
    AbortCountdown,
}

/// Side effects requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Send(Command),
    ArmBusyTimer { control: Control, generation: u64 },
    Notify(NotificationChange),
}

/// Snapshot rendered by the host UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarView {
    pub visible: bool,
    pub power_state: PowerState,
    pub power_label: &'static str,
    pub power_class: &'static str,
    pub power_busy: bool,
    pub management_enabled: Option<bool>,
    pub management_busy: bool,
    pub notification: Option<Notification>,
    pub last_command: Option<Command>,
    pub last_command_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct Sidebar {
    plugin: String,
    session: SessionGate,
    reconciler: PowerReconciler,
    dispatcher: CommandDispatcher,
    notifications: NotificationManager,
    last_command: Option<(Command, DateTime<Utc>)>,
}

impl Sidebar {
    pub fn new(session: SessionGate, options: NotificationOptions) -> Self {
        Self {
            plugin: DEFAULT_PLUGIN.to_string(),
            session,
            reconciler: PowerReconciler::new(),
            dispatcher: CommandDispatcher::new(),
            notifications: NotificationManager::new(options),
            last_command: None,
        }
    }

    /// Listen for push messages under a different plugin name
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = plugin.into();
        self
    }

    pub fn power(&self) -> PowerState {
        self.reconciler.power()
    }

    pub fn management_enabled(&self) -> Option<bool> {
        self.reconciler.management_enabled()
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.dispatcher.is_busy(control)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn view(&self) -> SidebarView {
        let power = self.reconciler.power();
        SidebarView {
            visible: self.session.is_visible(),
            power_state: power,
            power_label: power.label(),
            power_class: power.emphasis().button_class(),
            power_busy: self.dispatcher.is_busy(Control::Power),
            management_enabled: self.reconciler.management_enabled(),
            management_busy: self.dispatcher.is_busy(Control::Management),
            notification: self.notifications.current().cloned(),
            last_command: self.last_command.map(|(command, _)| command),
            last_command_at: self.last_command.map(|(_, at)| at),
        }
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if let Event::Session { logged_in } = event {
            return self.on_session(logged_in);
        }
        if !self.session.is_active() {
            debug!("Power controls inactive, dropping {:?}", event);
            return Vec::new();
        }

        match event {
            Event::Session { .. } => Vec::new(),
            Event::StartupComplete | Event::Reconnected => self.refresh(),
            Event::Plugin(message) => self.on_plugin_message(message),
            Event::Completed { command, outcome } => self.on_completed(command, outcome),
            Event::BusyExpired {
                control,
                generation,
            } => {
                if !self.dispatcher.busy_mut().expire(control, generation) {
                    debug!("Stale busy timer for {} control", control);
                }
                Vec::new()
            }
        }
    }

    pub fn act(&mut self, action: UserAction) -> Result<Vec<Effect>, Rejection> {
        if !self.session.is_active() {
            return Err(Rejection::Inactive);
        }

        let effects = match action {
            UserAction::TogglePower => {
                let command = self.dispatcher.toggle_power(self.reconciler.power())?;
                vec![self.send(command)]
            }
            UserAction::ToggleManagement => {
                let command = self
                    .dispatcher
                    .toggle_management(self.reconciler.management_enabled())?;
                vec![self.send(command)]
            }
            UserAction::AbortCountdown => {
                // Removal and the abort command leave in the same batch
                let removed = self.notifications.abort().ok_or(Rejection::NothingToAbort)?;
                vec![Effect::Notify(removed), self.send(Command::AbortPowerOff)]
            }
        };
        Ok(effects)
    }

    fn send(&mut self, command: Command) -> Effect {
        self.last_command = Some((command, Utc::now()));
        Effect::Send(command)
    }

    /// Suppress both controls and pull fresh state
    fn refresh(&mut self) -> Vec<Effect> {
        let busy = self.dispatcher.busy_mut();
        busy.hold(Control::Power);
        busy.hold(Control::Management);
        vec![
            Effect::Send(Command::GetPrinterPowerState),
            Effect::Send(Command::GetPowerManagementState),
        ]
    }

    fn on_session(&mut self, logged_in: bool) -> Vec<Effect> {
        match self.session.set_logged_in(logged_in) {
            SessionTransition::Activated => self.refresh(),
            SessionTransition::Deactivated => {
                self.reconciler.force_unknown();
                self.dispatcher.busy_mut().clear_all();
                self.notifications
                    .dismiss()
                    .map(Effect::Notify)
                    .into_iter()
                    .collect()
            }
            SessionTransition::Unchanged => Vec::new(),
        }
    }

    fn on_plugin_message(&mut self, message: PluginMessage) -> Vec<Effect> {
        let event = match message.route(&self.plugin) {
            Ok(Some(event)) => event,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Dropping malformed {} message: {}", message.plugin, e);
                return Vec::new();
            }
        };

        let change = match event {
            PushEvent::PstateUpdate { .. } => {
                if let Some(code) = event.power_code() {
                    self.reconciler.apply_power_state(code);
                }
                None
            }
            PushEvent::Cancel => self.notifications.on_cancel(),
            PushEvent::Timeout { timeout_value } => self.notifications.on_timeout(timeout_value),
        };
        change.map(Effect::Notify).into_iter().collect()
    }

    fn on_completed(&mut self, command: Command, outcome: Result<Value, ClientError>) -> Vec<Effect> {
        if command.is_query() {
            if let Some(control) = command.control() {
                self.dispatcher.busy_mut().release_hold(control);
            }
            match outcome {
                Ok(body) => self.reconciler.apply_pull(command, &body),
                Err(e) => debug!("State pull failed, keeping previous value: {}", e),
            }
            return Vec::new();
        }

        if let Err(e) = outcome {
            debug!("Command not acknowledged: {}", e);
            return Vec::new();
        }

        let Some(ack) = self.dispatcher.acknowledge(command) else {
            return Vec::new();
        };
        let mut effects = vec![Effect::ArmBusyTimer {
            control: ack.control,
            generation: ack.generation,
        }];
        if let Some(enabled) = ack.management_enabled {
            self.reconciler.apply_management_state(enabled);
        }
        if ack.supersedes_countdown {
            effects.extend(self.notifications.dismiss().map(Effect::Notify));
        }
        effects
    }
}
