use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use thiserror::Error;
use tracing::debug;

use crate::config::JWTConfig;
use crate::models::Claims;

/// Source of the current time in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token expired at {exp}")]
    Expired { exp: i64 },
}

/// Decodes bearer tokens into [`Claims`].
///
/// Without a configured secret the payload is read without signature
/// verification, the way a browser client reads its own token. Expiry is
/// always checked against the supplied time: a token is valid only while
/// `exp` is strictly in the future.
#[derive(Debug, Clone, Default)]
pub struct TokenDecoder {
    secret: Option<String>,
}

impl TokenDecoder {
    pub fn new(config: &JWTConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// A decoder that only reads the payload.
    pub fn unverified() -> Self {
        Self::default()
    }

    pub fn verifies_signature(&self) -> bool {
        self.secret.is_some()
    }

    /// Decodes `token` and checks it is still valid at `now`.
    pub fn decode(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let claims = self.decode_claims(token)?;
        if !claims.is_valid_at(now) {
            debug!(exp = claims.exp, now, "token is expired");
            return Err(TokenError::Expired { exp: claims.exp });
        }
        Ok(claims)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let (key, mut validation) = match &self.secret {
            Some(secret) => (
                DecodingKey::from_secret(secret.as_bytes()),
                Validation::new(Algorithm::HS256),
            ),
            None => {
                let mut validation = Validation::default();
                validation.insecure_disable_signature_validation();
                (DecodingKey::from_secret(&[]), validation)
            }
        };

        // expiry is checked against the injected clock, strictly
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
