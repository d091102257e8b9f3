//! Application startup.
//!
//! Builds the session store from configuration: token storage, the remote
//! login API and the token decoder, then restores any persisted session.

use std::sync::Arc;

use tracing::info;

use crate::api::HttpAuthApi;
use crate::config::ConfigV1;
use crate::session::{SessionState, SessionStore};
use crate::storage::create_storage;
use crate::token::{SystemClock, TokenDecoder};

/// Wires up a [`SessionStore`] for the given configuration. The store starts out loading.
///
/// # Errors
///
/// Returns an error if the HTTP client for the login API cannot be built.
pub fn build_session_store(config: &ConfigV1) -> Result<SessionStore, reqwest::Error> {
    let storage = create_storage(&config.storage);
    let api = Arc::new(HttpAuthApi::new(&config.api)?);
    let decoder = TokenDecoder::new(&config.jwt);
    if !decoder.verifies_signature() {
        info!("No jwt.secret configured, token signatures are not verified");
    }
    Ok(SessionStore::new(
        storage,
        api,
        decoder,
        Arc::new(SystemClock),
    ))
}

/// Builds the store and runs the startup restore.
pub async fn start(config: &ConfigV1) -> Result<(SessionStore, SessionState), reqwest::Error> {
    let store = build_session_store(config)?;
    let state = store.restore().await;
    Ok((store, state))
}
