//! Local belief about printer power and the power-saver policy

use serde_json::Value;
use tracing::{debug, info};

use crate::client::{Command, PowerManagementStateResponse, PrinterPowerStateResponse};
use crate::state::PowerState;

/// Applies pulled and pushed state.
///
/// Updates are not sequenced: whichever reply or push is applied last wins,
/// so a slow pull reply can overwrite a fresher push.
#[derive(Debug, Default)]
pub struct PowerReconciler {
    power: PowerState,
    management_enabled: Option<bool>,
}

impl PowerReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    /// `None` until the first management pull resolves
    pub fn management_enabled(&self) -> Option<bool> {
        self.management_enabled
    }

    pub fn apply_power_state(&mut self, code: i64) -> PowerState {
        let state = PowerState::from_code(code);
        if state != self.power {
            info!("Printer power state: {} -> {}", self.power.label(), state.label());
        }
        self.power = state;
        state
    }

    pub fn apply_management_state(&mut self, enabled: bool) {
        if self.management_enabled != Some(enabled) {
            info!(
                "Power management {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        self.management_enabled = Some(enabled);
    }

    pub fn force_unknown(&mut self) {
        self.power = PowerState::Unknown;
    }

    /// Apply a successful pull reply. Replies missing their field are ignored.
    pub fn apply_pull(&mut self, command: Command, body: &Value) {
        match command {
            Command::GetPrinterPowerState => {
                match pulled_power_code(body) {
                    Some(code) => {
                        self.apply_power_state(code);
                    }
                    None => debug!("Ignoring power state reply without state: {}", body),
                }
            }
            Command::GetPowerManagementState => {
                match serde_json::from_value::<PowerManagementStateResponse>(body.clone()) {
                    Ok(PowerManagementStateResponse {
                        is_enabled: Some(enabled),
                    }) => self.apply_management_state(enabled),
                    _ => debug!("Ignoring management reply without isEnabled: {}", body),
                }
            }
            other => debug!("{} is not a state pull", other),
        }
    }
}

/// Power code of a pull reply, `None` when it has no usable `state`
fn pulled_power_code(body: &Value) -> Option<i64> {
    serde_json::from_value::<PrinterPowerStateResponse>(body.clone())
        .ok()
        .and_then(|reply| reply.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn starts_unresolved() {
        let reconciler = PowerReconciler::new();
        assert_eq!(reconciler.power(), PowerState::Unknown);
        assert_eq!(reconciler.management_enabled(), None);
    }

    #[test]
    fn pull_then_pushes_last_writer_wins() {
        let mut reconciler = PowerReconciler::new();
        reconciler.apply_pull(Command::GetPrinterPowerState, &json!({ "state": 1 }));
        assert_eq!(reconciler.power(), PowerState::On);

        reconciler.apply_power_state(0);
        assert_eq!(reconciler.power(), PowerState::Off);

        reconciler.apply_power_state(5);
        assert_eq!(reconciler.power(), PowerState::Unknown);
    }

    #[test]
    fn stale_pull_overwrites_fresher_push() {
        let mut reconciler = PowerReconciler::new();
        reconciler.apply_power_state(1);
        reconciler.apply_pull(Command::GetPrinterPowerState, &json!({ "state": 0 }));
        assert_eq!(reconciler.power(), PowerState::Off);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let mut reconciler = PowerReconciler::new();
        let once = reconciler.apply_power_state(1);
        let twice = reconciler.apply_power_state(1);
        assert_eq!(once, twice);
        assert_eq!(reconciler.power(), PowerState::On);
    }

    #[test]
    fn replies_without_fields_are_ignored() {
        let mut reconciler = PowerReconciler::new();
        reconciler.apply_power_state(1);
        reconciler.apply_management_state(true);

        reconciler.apply_pull(Command::GetPrinterPowerState, &json!({ "state": null }));
        reconciler.apply_pull(Command::GetPowerManagementState, &Value::Null);
        reconciler.apply_pull(Command::GetPowerManagementState, &json!({ "isEnabled": "yes" }));

        assert_eq!(reconciler.power(), PowerState::On);
        assert_eq!(reconciler.management_enabled(), Some(true));
    }

    #[test]
    fn management_pull_resolves_flag() {
        let mut reconciler = PowerReconciler::new();
        reconciler.apply_pull(Command::GetPowerManagementState, &json!({ "isEnabled": false }));
        assert_eq!(reconciler.management_enabled(), Some(false));
    }
}
