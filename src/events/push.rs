//! Server push messages

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::state::power_state::PSTATE_UNKNOWN;

/// Plugin name the server uses for this subsystem's messages
pub const DEFAULT_PLUGIN: &str = "powermanager";

/// A plugin message as the host's push channel delivers it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginMessage {
    pub plugin: String,
    #[serde(default)]
    pub data: Value,
}

/// Messages the power plugin pushes, keyed by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushEvent {
    PstateUpdate {
        #[serde(default, deserialize_with = "lenient_int")]
        pstate: Option<i64>,
    },
    Cancel,
    Timeout {
        #[serde(default, deserialize_with = "lenient_int")]
        timeout_value: Option<i64>,
    },
}

impl PushEvent {
    /// Power code carried by a `pstate_update`, absent values read as unknown
    pub fn power_code(&self) -> Option<i64> {
        match self {
            PushEvent::PstateUpdate { pstate } => Some(pstate.unwrap_or(PSTATE_UNKNOWN)),
            _ => None,
        }
    }
}

/// Accept integers, integral floats and numeric strings; anything else is absent
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

impl PluginMessage {
    /// Route a message to this subsystem.
    ///
    /// `Ok(None)` for other plugins and unknown types, which are ignored;
    /// `Err` when a known type carries a payload that cannot be read.
    pub fn route(&self, plugin: &str) -> Result<Option<PushEvent>, serde_json::Error> {
        if self.plugin != plugin {
            return Ok(None);
        }

        match self.data.get("type").and_then(Value::as_str) {
            Some("pstate_update" | "cancel" | "timeout") => {
                PushEvent::deserialize(&self.data).map(Some)
            }
            _ => Ok(None),
        }
    }
}
