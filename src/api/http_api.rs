use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{AuthApi, LoginError};
use crate::config::ApiConfig;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Calls `POST {base_url}/auth/login` with a JSON body of email and password.
pub struct HttpAuthApi {
    client: Client,
    login_url: String,
}

impl HttpAuthApi {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let login_url = format!("{}/auth/login", config.base_url.trim_end_matches('/'));
        info!("Using login endpoint {}", login_url);
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()?;
        Ok(Self { client, login_url })
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    fn get_name(&self) -> &str {
        "http"
    }

    async fn login(&self, identifier: &str, secret: &str) -> Result<String, LoginError> {
        debug!("Sending login request to: {}", self.login_url);
        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest {
                email: identifier,
                password: secret,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(
                    event_name = "api.login.unreachable",
                    event_domain = "api",
                    error = %e,
                    "login endpoint could not be reached"
                );
                LoginError::Network("Server is not running.".to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LoginError::Network(format!("Error reading response body: {}", e)))?;

        if status.is_success() {
            let parsed: LoginResponse = serde_json::from_str(&body)
                .map_err(|e| LoginError::UnexpectedResponse(format!("Error parsing JSON: {}", e)))?;
            return match parsed.token {
                Some(token) if !token.is_empty() => Ok(token),
                _ => Err(LoginError::UnexpectedResponse(
                    "response did not contain a token".to_string(),
                )),
            };
        }

        let message = error_message(&body).unwrap_or_else(|| "Login failed".to_string());
        if status.is_client_error() {
            debug!(status = status.as_u16(), "login rejected: {}", message);
            Err(LoginError::Authentication(message))
        } else {
            warn!(status = status.as_u16(), "login failed on the server: {}", message);
            Err(LoginError::UnexpectedResponse(describe(status, &message)))
        }
    }
}

/// Pulls the `error` (or `message`) field out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn describe(status: StatusCode, message: &str) -> String {
    format!("{} ({})", message, status)
}
