//! Sidebar synchronization module
//! 
//! The four cooperating components (session gate, power reconciler,
//! command dispatcher, notification manager) and the state machine that
//! composes them.

pub mod dispatcher;
pub mod notifications;
pub mod reconciler;
pub mod session;
pub mod sidebar;

// Re-export main types
pub use dispatcher::{Acknowledgment, CommandDispatcher, Rejection};
pub use notifications::{
    LogSink, Notification, NotificationAction, NotificationChange, NotificationManager,
    NotificationOptions, NotificationSink,
};
pub use reconciler::PowerReconciler;
pub use session::{SessionGate, SessionTransition};
pub use sidebar::{Effect, Event, Sidebar, SidebarView, UserAction};
