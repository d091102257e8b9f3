use async_trait::async_trait;
use thiserror::Error;

/// Why a login attempt failed.
///
/// Credential rejection and an unreachable server are kept apart so the
/// login screen can tell the user which one happened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The API answered and refused the credentials.
    #[error("{0}")]
    Authentication(String),
    /// The API could not be reached (connection refused, DNS, timeout).
    #[error("Network Error: {0}")]
    Network(String),
    /// The API answered with something other than a usable login response.
    #[error("unexpected response from server: {0}")]
    UnexpectedResponse(String),
    /// The issued token could not be decoded or was already expired.
    #[error("server issued an invalid token: {0}")]
    InvalidToken(String),
}

/// The remote login endpoint: exchanges credentials for a fresh bearer token.
#[async_trait]
pub trait AuthApi: Send + Sync {
    fn get_name(&self) -> &str;
    async fn login(&self, identifier: &str, secret: &str) -> Result<String, LoginError>;
}
