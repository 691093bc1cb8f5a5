//! Power Sidebar - keeps a printer power sidebar in sync with the print server
//! 
//! This library tracks the printer's power state and the power-saver policy,
//! turns sidebar clicks into server commands with a busy window after each
//! acknowledgment, and manages the single pending-shutdown countdown the
//! server announces over its push channel.

pub mod api;
pub mod client;
pub mod config;
pub mod events;
pub mod state;
pub mod sync;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use client::{HttpClient, PowerApi};
pub use config::Config;
pub use state::AppState;
pub use sync::{Sidebar, SidebarView};
