//! Print server client module
//! 
//! Every pull and command is a single POST to the plugin endpoint with a
//! `command` field; replies are small JSON objects or empty acks.

pub mod commands;
pub mod error;
pub mod http;

use async_trait::async_trait;
use serde_json::Value;

// Re-export main types
pub use commands::{
    Command, CommandRequest, PowerManagementStateResponse, PrinterPowerStateResponse,
};
pub use error::ClientError;
pub use http::HttpClient;

/// Outbound side of the sidebar.
///
/// `Ok` means the server acknowledged the request; the body is the decoded
/// JSON reply, or `Value::Null` for an empty ack.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PowerApi: Send + Sync {
    async fn send(&self, command: Command) -> Result<Value, ClientError>;
}
