//! Commands understood by the print server's power plugin

use serde::{Deserialize, Serialize};

use crate::state::Control;

/// One value of the `command` field posted to the plugin endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    GetPrinterPowerState,
    GetPowerManagementState,
    EnablePowerManagement,
    DisablePowerManagement,
    PowerOnPrinter,
    PowerOffPrinter,
    AbortPowerOff,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        match self {
            Command::GetPrinterPowerState => "get_printer_power_state",
            Command::GetPowerManagementState => "get_power_management_state",
            Command::EnablePowerManagement => "enable_power_management",
            Command::DisablePowerManagement => "disable_power_management",
            Command::PowerOnPrinter => "power_on_printer",
            Command::PowerOffPrinter => "power_off_printer",
            Command::AbortPowerOff => "abort_power_off",
        }
    }

    /// True for the two state pulls
    pub fn is_query(self) -> bool {
        matches!(
            self,
            Command::GetPrinterPowerState | Command::GetPowerManagementState
        )
    }

    /// The sidebar control whose state this command reads or changes
    pub fn control(self) -> Option<Control> {
        match self {
            Command::GetPrinterPowerState | Command::PowerOnPrinter | Command::PowerOffPrinter => {
                Some(Control::Power)
            }
            Command::GetPowerManagementState
            | Command::EnablePowerManagement
            | Command::DisablePowerManagement => Some(Control::Management),
            Command::AbortPowerOff => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body posted for every command
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest {
    pub command: Command,
}

/// Reply to `get_printer_power_state`
#[derive(Debug, Clone, Deserialize)]
pub struct PrinterPowerStateResponse {
    pub state: Option<i64>,
}

/// Reply to `get_power_management_state`
#[derive(Debug, Clone, Deserialize)]
pub struct PowerManagementStateResponse {
    #[serde(rename = "isEnabled")]
    pub is_enabled: Option<bool>,
}
