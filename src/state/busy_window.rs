//! Per-control busy suppression

use serde::{Deserialize, Serialize};

/// The two sidebar controls that can issue commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Power,
    Management,
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Control::Power => f.write_str("power"),
            Control::Management => f.write_str("management"),
        }
    }
}

/// Busy state of one control.
///
/// Waiting for data and a timed window are tracked apart: a pull finishing
/// never ends a window, and a superseded timer never ends a hold.
#[derive(Debug, Default)]
struct BusyFlag {
    awaiting_data: bool,
    /// Generation of the armed window, if any
    window: Option<u64>,
    generation: u64,
}

impl BusyFlag {
    fn is_busy(&self) -> bool {
        self.awaiting_data || self.window.is_some()
    }
}

/// Busy flags for both controls.
///
/// Expiry timers cannot be cancelled, so every armed window gets a fresh
/// generation and an expiry only clears the flag when it still owns it.
#[derive(Debug, Default)]
pub struct BusyWindows {
    power: BusyFlag,
    management: BusyFlag,
}

impl BusyWindows {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, control: Control) -> &BusyFlag {
        match control {
            Control::Power => &self.power,
            Control::Management => &self.management,
        }
    }

    fn flag_mut(&mut self, control: Control) -> &mut BusyFlag {
        match control {
            Control::Power => &mut self.power,
            Control::Management => &mut self.management,
        }
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.flag(control).is_busy()
    }

    /// Start a timed window; returns the generation the expiry must present
    pub fn arm(&mut self, control: Control) -> u64 {
        let flag = self.flag_mut(control);
        flag.generation += 1;
        flag.window = Some(flag.generation);
        flag.generation
    }

    /// Suppress the control until fresh data arrives
    pub fn hold(&mut self, control: Control) {
        self.flag_mut(control).awaiting_data = true;
    }

    /// Lift a [`hold`](Self::hold); timed windows are left alone
    pub fn release_hold(&mut self, control: Control) {
        self.flag_mut(control).awaiting_data = false;
    }

    /// Handle a fired timer. Returns false when the window was superseded.
    pub fn expire(&mut self, control: Control, generation: u64) -> bool {
        let flag = self.flag_mut(control);
        if flag.window == Some(generation) {
            flag.window = None;
            true
        } else {
            false
        }
    }

    /// Drop every suppression, stale timers included
    pub fn clear_all(&mut self) {
        for control in [Control::Power, Control::Management] {
            let flag = self.flag_mut(control);
            flag.awaiting_data = false;
            flag.window = None;
        }
    }
}
