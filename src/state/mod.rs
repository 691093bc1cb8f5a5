//! State management module
//! 
//! Value types the sidebar reasons about, plus the shared handle the HTTP
//! layer uses to reach the event loop.

pub mod app_state;
pub mod busy_window;
pub mod countdown;
pub mod power_state;

// Re-export main types
pub use app_state::{AppState, StateError};
pub use busy_window::{BusyWindows, Control};
pub use countdown::Countdown;
pub use power_state::{Emphasis, PowerState};
