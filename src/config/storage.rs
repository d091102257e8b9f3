use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the session token is persisted between runs.
/// We differentiate the backends via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    /// A small JSON document on disk.
    #[serde(rename = "file")]
    File(FileStorageConfig),
    /// Process memory only; nothing survives a restart.
    #[serde(rename = "memory")]
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File(FileStorageConfig {
            path: ".shopgate/session.json".to_string(),
        })
    }
}
