//! Push event module
//! 
//! Parsing and routing of server-initiated plugin messages.

pub mod push;

pub use push::{PluginMessage, PushEvent, DEFAULT_PLUGIN};
