//! Onboarding flow as an explicit state machine.

use std::fmt;

use tracing::info;

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Landing,
    Signup,
    FinancialSetup,
    Dashboard,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Landing => "landing",
            SessionState::Signup => "signup",
            SessionState::FinancialSetup => "financialSetup",
            SessionState::Dashboard => "dashboard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Back,
    /// Account created or signed in; users with a stored profile skip setup.
    SignedUp { has_profile: bool },
    SetupCompleted,
    SignOut,
}

/// Current onboarding position for one user session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dashboard(&self) -> bool {
        self.state == SessionState::Dashboard
    }

    /// Applies `event`; invalid pairs leave the state unchanged.
    pub fn transition(&mut self, event: SessionEvent) -> Result<SessionState, CoreError> {
        let next = next_state(self.state, event).ok_or(CoreError::InvalidTransition {
            state: self.state,
            event,
        })?;
        info!(from = %self.state, to = %next, ?event, "session transition");
        self.state = next;
        Ok(next)
    }
}

fn next_state(state: SessionState, event: SessionEvent) -> Option<SessionState> {
    use SessionEvent::*;
    use SessionState::*;

    match (state, event) {
        (Landing, Start) => Some(Signup),
        (Signup, Back) => Some(Landing),
        (Signup, SignedUp { has_profile: true }) => Some(Dashboard),
        (Signup, SignedUp { has_profile: false }) => Some(FinancialSetup),
        (FinancialSetup, Back) => Some(Signup),
        (FinancialSetup, SetupCompleted) => Some(Dashboard),
        (FinancialSetup | Dashboard, SignOut) => Some(Landing),
        _ => None,
    }
}
