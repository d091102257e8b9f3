#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use shopgate::api::HttpAuthApi;
use shopgate::config::{ApiConfig, FileStorageConfig};
use shopgate::session::SessionStore;
use shopgate::storage::{FileStorage, TokenStorage};
use shopgate::token::{Clock, TokenDecoder};
use tempfile::TempDir;

pub const NOW: i64 = 1_750_000_000;
pub const HOUR: i64 = 3600;

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

pub fn payload(role: &str, exp: i64) -> Value {
    json!({
        "id": 17,
        "role": role,
        "name": "Test Person",
        "email": "a@b.com",
        "iat": NOW - 60,
        "exp": exp,
    })
}

/// Signs `payload` the way the API does (HS256).
pub fn mint(payload: &Value) -> String {
    encode(
        &Header::default(),
        payload,
        &EncodingKey::from_secret(b"api-secret"),
    )
    .expect("Failed to create token")
}

/// A session file inside a fresh temporary directory.
/// Keep the guard alive for the whole test; the directory is removed when it drops.
pub fn session_file() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    (dir, path)
}

pub fn file_storage(path: &Path) -> Arc<dyn TokenStorage> {
    Arc::new(FileStorage::new(&FileStorageConfig {
        path: path.to_string_lossy().into_owned(),
    }))
}

/// A store as the binary builds it, but over an explicit storage, API url and clock.
pub fn store_with(storage: Arc<dyn TokenStorage>, api_url: &str) -> SessionStore {
    let api = HttpAuthApi::new(&ApiConfig {
        base_url: api_url.to_string(),
        timeout_in_ms: 2000,
    })
    .expect("client should build");
    SessionStore::new(
        storage,
        Arc::new(api),
        TokenDecoder::unverified(),
        Arc::new(FixedClock(NOW)),
    )
}
