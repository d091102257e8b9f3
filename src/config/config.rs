use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "SHOPGATE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: remote API, token storage, token checks and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub jwt: JWTConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load config from `$SHOPGATE_CONFIG` (or "config.yaml" in the current directory),
/// overlaid with `SHOPGATE_*` environment variables. Exits the process on error.
pub fn load_config() -> ConfigV1 {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    match load_config_from(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load config from a specific YAML file plus the environment overlay.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new().merge(Yaml::file(path.as_ref())).merge(
        Env::prefixed("SHOPGATE_")
            .ignore(&["config"])
            .split("__"),
    );
    extract(figment)
}

/// Extract a versioned config from an arbitrary figment.
pub fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// The remote API consumed by the login flow.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// e.g. "http://localhost:5000/api"
    pub base_url: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

/// How session tokens are checked on this side.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct JWTConfig {
    /// Shared HS256 secret. When unset, token payloads are read unverified.
    #[serde(default)]
    pub secret: Option<String>,
}
