use std::fmt;

use tokio::sync::watch;

use crate::models::{Claims, Role};

/// A logged-in identity: the bearer token and its decoded, unexpired claims.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        self.claims.role()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

/// The three states a session can be observed in.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// The persisted token is still being read at startup.
    #[default]
    Loading,
    /// Nobody is logged in.
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.session().map(|s| &s.claims)
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }
}

/// Read-only view of the session shared with the guard and every screen.
///
/// Every clone observes the same state; a change published by the store is
/// visible on the next call to [`SessionHandle::state`].
#[derive(Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub(crate) fn new(rx: watch::Receiver<SessionState>) -> Self {
        Self { rx }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    /// Waits until the startup restore has finished and returns the state it produced.
    pub async fn wait_until_ready(&mut self) -> SessionState {
        if let Ok(state) = self.rx.wait_for(|state| !state.is_loading()).await {
            return state.clone();
        }
        // the store is gone, nothing will change any more
        self.state()
    }

    /// Waits for the next published change. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
