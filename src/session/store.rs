use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Session, SessionHandle, SessionState};
use crate::api::{AuthApi, LoginError};
use crate::models::Claims;
use crate::storage::{StorageError, TokenStorage};
use crate::token::{Clock, TokenDecoder};

/// Single source of truth for who is logged in, with what role, until when.
///
/// The store is the only writer of the session. Each transition is published
/// as one whole [`SessionState`], so readers never see a token without claims
/// or claims without a token.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn TokenStorage>,
    api: Arc<dyn AuthApi>,
    decoder: TokenDecoder,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates a store in the `Loading` state. Call [`SessionStore::restore`] once at startup.
    pub fn new(
        storage: Arc<dyn TokenStorage>,
        api: Arc<dyn AuthApi>,
        decoder: TokenDecoder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            state,
            storage,
            api,
            decoder,
            clock,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(self.state.subscribe())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Reads the persisted token and turns it into a session.
    ///
    /// A missing, undecodable or expired token yields an anonymous session;
    /// bad tokens are discarded from storage without surfacing an error.
    /// Loading is cleared by the final publication on every branch.
    pub async fn restore(&self) -> SessionState {
        self.state.send_replace(SessionState::Loading);

        let next = match self.storage.load().await {
            Ok(None) => {
                debug!("No persisted session token found");
                SessionState::Anonymous
            }
            Ok(Some(token)) => match self.decoder.decode(&token, self.clock.now()) {
                Ok(claims) => {
                    info!(
                        event_name = "session.restore.success",
                        event_domain = "session",
                        subject = claims.id.as_str(),
                        role = claims.role.as_str(),
                        exp = claims.exp,
                        "restored persisted session"
                    );
                    SessionState::Authenticated(Session { token, claims })
                }
                Err(e) => {
                    debug!(
                        event_name = "session.restore.discarded",
                        event_domain = "session",
                        reason = %e,
                        "discarding persisted session token"
                    );
                    self.discard_persisted().await;
                    SessionState::Anonymous
                }
            },
            Err(StorageError::Corrupt(e)) => {
                warn!("Session storage is corrupt, discarding it: {}", e);
                self.discard_persisted().await;
                SessionState::Anonymous
            }
            Err(e) => {
                warn!("Could not read persisted session token: {}", e);
                SessionState::Anonymous
            }
        };

        self.state.send_replace(next.clone());
        next
    }

    /// Exchanges credentials for a token and starts a session.
    ///
    /// Returns the decoded claims so the caller can navigate by role; the
    /// store itself never navigates. The session is left untouched on failure.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Claims, LoginError> {
        debug!("Logging in '{}' via {} api", identifier, self.api.get_name());
        let token = match self.api.login(identifier, secret).await {
            Ok(token) => token,
            Err(e) => {
                info!(
                    event_name = "session.login.failed",
                    event_domain = "session",
                    identifier,
                    reason = %e,
                    "login failed"
                );
                return Err(e);
            }
        };

        let claims = self.decoder.decode(&token, self.clock.now()).map_err(|e| {
            warn!(
                event_name = "session.login.invalid_token",
                event_domain = "session",
                reason = %e,
                "discarding token issued by login"
            );
            LoginError::InvalidToken(e.to_string())
        })?;

        if let Err(e) = self.storage.save(&token).await {
            warn!(
                "Could not persist session token to {} storage: {}",
                self.storage.get_name(),
                e
            );
        }

        info!(
            event_name = "session.login.success",
            event_domain = "session",
            subject = claims.id.as_str(),
            role = claims.role.as_str(),
            "logged in"
        );
        self.state.send_replace(SessionState::Authenticated(Session {
            token,
            claims: claims.clone(),
        }));
        Ok(claims)
    }

    /// Ends the session. Idempotent and infallible.
    pub async fn logout(&self) {
        self.discard_persisted().await;
        let previous = self.state.send_replace(SessionState::Anonymous);
        if let Some(claims) = previous.claims() {
            info!(
                event_name = "session.logout",
                event_domain = "session",
                subject = claims.id.as_str(),
                "logged out"
            );
        }
    }

    async fn discard_persisted(&self) {
        if let Err(e) = self.storage.clear().await {
            warn!(
                "Could not clear session token from {} storage: {}",
                self.storage.get_name(),
                e
            );
        }
    }
}
