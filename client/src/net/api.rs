//! Login endpoint client.
//!
//! `HttpAuthApi` is a thin reqwest wrapper; the status/body interpretation
//! lives in [`classify_reply`] so it can be tested without a server.

use std::time::Duration;

use wire::{ApiResponse, Credentials, LOGIN_PATH, MapSeed, ServiceInfo, UserRecord};

use super::config::ClientConfig;
use super::error::{ClientBuildError, LoginError};

const EMPTY_REPLY: &str = "Respuesta vacía del servidor";

/// A successful login as seen by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSuccess {
    pub user: UserRecord,
    /// Absent when the server does not send `mapData`.
    pub map_seed: Option<MapSeed>,
}

/// Transport seam between the controller and the auth server.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Submit one login attempt. Implementations must not retry.
    ///
    /// # Errors
    ///
    /// Returns a [`LoginError`] for refused credentials, server faults and
    /// transport faults alike.
    async fn login(&self, credentials: &Credentials) -> Result<LoginSuccess, LoginError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpAuthApi {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()
            .map_err(|e| ClientBuildError(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the liveness payload from `GET /`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the server is unreachable or replies with
    /// anything other than the liveness payload.
    pub async fn service_info(&self) -> Result<ServiceInfo, LoginError> {
        let response = self.http.get(self.config.endpoint("/")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoginError::transport(status_message(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            )));
        }
        Ok(response.json::<ServiceInfo>().await?)
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginSuccess, LoginError> {
        let response = self
            .http
            .post(self.config.endpoint(LOGIN_PATH))
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        classify_reply(status.as_u16(), status.canonical_reason().unwrap_or_default(), &body)
    }
}

// =============================================================================
// REPLY CLASSIFICATION
// =============================================================================

fn status_message(status: u16, reason: &str) -> String {
    format!("Error: {status} - {reason}")
}

/// Interpret one HTTP reply from the login endpoint.
///
/// # Errors
///
/// 400, 401 and 5xx map to their typed failures, carrying the server's
/// message when the body has one. Any other non-2xx status, an unreadable
/// 2xx body or a success without a user is a transport fault.
pub fn classify_reply(status: u16, reason: &str, body: &str) -> Result<LoginSuccess, LoginError> {
    let parsed = serde_json::from_str::<ApiResponse>(body);

    if (200..300).contains(&status) {
        let reply = parsed.map_err(|e| LoginError::transport(format!("respuesta inválida del servidor: {e}")))?;
        if !reply.success {
            return Err(LoginError::InvalidCredentials { message: reply.message });
        }
        let Some(user) = reply.user else {
            return Err(LoginError::transport(EMPTY_REPLY));
        };
        return Ok(LoginSuccess { user, map_seed: reply.map_data });
    }

    let message = parsed
        .ok()
        .map(|reply| reply.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status_message(status, reason));

    match status {
        400 => Err(LoginError::MissingFields { message }),
        401 => Err(LoginError::InvalidCredentials { message }),
        500..=599 => Err(LoginError::ServerInternal { message }),
        _ => Err(LoginError::transport(status_message(status, reason))),
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
