//! Login gating of the sidebar

use tracing::{debug, info};

/// Result of feeding a session signal to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    Activated,
    Deactivated,
    Unchanged,
}

/// Tracks the host session.
///
/// Without a gate (`required == false`) the sidebar behaves as if a user
/// were always logged in and session signals are ignored.
#[derive(Debug)]
pub struct SessionGate {
    required: bool,
    logged_in: Option<bool>,
}

impl SessionGate {
    pub fn new(required: bool) -> Self {
        Self {
            required,
            logged_in: if required { None } else { Some(true) },
        }
    }

    /// Always logged in
    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_active(&self) -> bool {
        self.logged_in == Some(true)
    }

    /// The sidebar surface is shown exactly while active
    pub fn is_visible(&self) -> bool {
        self.is_active()
    }

    /// Feed a login state. The first signal always counts as a transition.
    pub fn set_logged_in(&mut self, logged_in: bool) -> SessionTransition {
        if !self.required {
            debug!("Session gate disabled, ignoring logged_in={}", logged_in);
            return SessionTransition::Unchanged;
        }
        if self.logged_in == Some(logged_in) {
            return SessionTransition::Unchanged;
        }

        self.logged_in = Some(logged_in);
        if logged_in {
            info!("Session logged in, activating power controls");
            SessionTransition::Activated
        } else {
            info!("Session logged out, deactivating power controls");
            SessionTransition::Deactivated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_starts_unresolved() {
        let mut gate = SessionGate::new(true);
        assert!(!gate.is_active());
        assert_eq!(gate.set_logged_in(false), SessionTransition::Deactivated);
        assert_eq!(gate.set_logged_in(false), SessionTransition::Unchanged);
        assert_eq!(gate.set_logged_in(true), SessionTransition::Activated);
        assert!(gate.is_visible());
    }

    #[test]
    fn absent_gate_is_always_active() {
        let mut gate = SessionGate::disabled();
        assert!(gate.is_active());
        assert_eq!(gate.set_logged_in(false), SessionTransition::Unchanged);
        assert!(gate.is_active());
    }
}
