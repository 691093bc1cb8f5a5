//! Background tasks module
//! 
//! The event loop that owns the sidebar, and the timers it spawns.

pub mod busy_timer;
pub mod event_loop;

// Re-export main functions
pub use busy_timer::busy_window_timer;
pub use event_loop::{EventLoop, Message};
