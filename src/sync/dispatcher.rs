//! User intent to outbound commands, with post-ack busy windows

use serde::Serialize;
use tracing::{debug, info};

use crate::client::Command;
use crate::state::{BusyWindows, Control, PowerState};

/// Why a user action was not carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "control", rename_all = "snake_case")]
pub enum Rejection {
    /// The session gate has the sidebar deactivated
    Inactive,
    /// The control is inside its busy window
    Busy(Control),
    /// Abort pressed with no countdown showing
    NothingToAbort,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Inactive => f.write_str("power controls are inactive"),
            Rejection::Busy(control) => write!(f, "{} control is busy", control),
            Rejection::NothingToAbort => f.write_str("no shutdown countdown to abort"),
        }
    }
}

/// What an acknowledged command changes locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgment {
    pub control: Control,
    /// Generation to hand to the busy window's expiry timer
    pub generation: u64,
    /// The countdown notification no longer applies
    pub supersedes_countdown: bool,
    /// New value for the power-management flag
    pub management_enabled: Option<bool>,
}

#[derive(Debug, Default)]
pub struct CommandDispatcher {
    busy: BusyWindows,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.busy.is_busy(control)
    }

    pub fn busy_mut(&mut self) -> &mut BusyWindows {
        &mut self.busy
    }

    /// Power on unless the printer is known to be on
    pub fn toggle_power(&self, current: PowerState) -> Result<Command, Rejection> {
        self.ensure_idle(Control::Power)?;
        Ok(if current.is_on() {
            Command::PowerOffPrinter
        } else {
            Command::PowerOnPrinter
        })
    }

    /// Enable unless the policy is known to be enabled
    pub fn toggle_management(&self, enabled_now: Option<bool>) -> Result<Command, Rejection> {
        self.ensure_idle(Control::Management)?;
        Ok(if enabled_now == Some(true) {
            Command::DisablePowerManagement
        } else {
            Command::EnablePowerManagement
        })
    }

    fn ensure_idle(&self, control: Control) -> Result<(), Rejection> {
        if self.busy.is_busy(control) {
            debug!("Rejecting {} toggle while busy", control);
            return Err(Rejection::Busy(control));
        }
        Ok(())
    }

    /// The transport acknowledged `command`; arms its control's busy window.
    ///
    /// Pulls and aborts have no control to suppress and yield `None`.
    pub fn acknowledge(&mut self, command: Command) -> Option<Acknowledgment> {
        if command.is_query() {
            return None;
        }
        let control = command.control()?;
        let generation = self.busy.arm(control);
        info!("{} acknowledged, {} control busy", command, control);

        Some(Acknowledgment {
            control,
            generation,
            supersedes_countdown: matches!(
                command,
                Command::PowerOffPrinter | Command::DisablePowerManagement
            ),
            management_enabled: match command {
                Command::EnablePowerManagement => Some(true),
                Command::DisablePowerManagement => Some(false),
                _ => None,
            },
        })
    }
}
