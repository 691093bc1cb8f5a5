//! Printer power state and its derived presentation

use serde::{Deserialize, Serialize};

/// Server code for a powered-off outlet
pub const PSTATE_OFF: i64 = 0;
/// Server code for a powered-on outlet
pub const PSTATE_ON: i64 = 1;
/// Sentinel the server reports when it cannot read the outlet
pub const PSTATE_UNKNOWN: i64 = 99;

/// What the sidebar believes about the printer's power outlet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Off,
    On,
    #[default]
    Unknown,
}

/// Visual emphasis of the power button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Danger,
    Success,
    Warning,
}

impl PowerState {
    /// Map a server power code onto a state.
    ///
    /// Only `0` and `1` are meaningful; the server's own "unknown" sentinel
    /// (99) and anything unrecognized collapse to [`PowerState::Unknown`].
    pub fn from_code(code: i64) -> Self {
        match code {
            PSTATE_OFF => PowerState::Off,
            PSTATE_ON => PowerState::On,
            _ => PowerState::Unknown,
        }
    }

    pub fn is_on(self) -> bool {
        self == PowerState::On
    }

    /// Text shown on the power button
    pub fn label(self) -> &'static str {
        match self {
            PowerState::Off => "Powered Off",
            PowerState::On => "Powered On",
            PowerState::Unknown => "Unknown",
        }
    }

    pub fn emphasis(self) -> Emphasis {
        match self {
            PowerState::Off => Emphasis::Danger,
            PowerState::On => Emphasis::Success,
            PowerState::Unknown => Emphasis::Warning,
        }
    }
}

impl Emphasis {
    /// Button class understood by the host stylesheet
    pub fn button_class(self) -> &'static str {
        match self {
            Emphasis::Danger => "btn-danger",
            Emphasis::Success => "btn-success",
            Emphasis::Warning => "btn-warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_states() {
        for code in -3..=120 {
            let state = PowerState::from_code(code);
            assert_eq!(state == PowerState::On, code == 1, "code {code}");
            assert_eq!(state == PowerState::Off, code == 0, "code {code}");
            assert_eq!(state == PowerState::Unknown, code != 0 && code != 1, "code {code}");
        }
        assert_eq!(PowerState::from_code(PSTATE_UNKNOWN), PowerState::Unknown);
        assert_eq!(PowerState::from_code(i64::MAX), PowerState::Unknown);
    }

    #[test]
    fn presentation_follows_variant() {
        assert_eq!(PowerState::Off.label(), "Powered Off");
        assert_eq!(PowerState::Off.emphasis().button_class(), "btn-danger");
        assert_eq!(PowerState::On.label(), "Powered On");
        assert_eq!(PowerState::On.emphasis().button_class(), "btn-success");
        assert_eq!(PowerState::Unknown.label(), "Unknown");
        assert_eq!(PowerState::Unknown.emphasis().button_class(), "btn-warning");
    }

    #[test]
    fn defaults_to_unknown() {
        assert_eq!(PowerState::default(), PowerState::Unknown);
    }
}
