//! Server configuration parsed from environment variables.

use std::net::IpAddr;

use wire::Credentials;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_AUTH_EMAIL: &str = "usuario@ejemplo.com";
pub const DEFAULT_AUTH_PASSWORD: &str = "123456";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Whether 500 replies may carry internal error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    Development,
    #[default]
    Production,
}

impl RunMode {
    /// Only `development` (any case) selects development mode.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("development") => Self::Development,
            _ => Self::Production,
        }
    }

    #[must_use]
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub mode: RunMode,
    /// The single accepted credential pair.
    pub credentials: Credentials,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `APP_ENV` (falls back to `NODE_ENV`): `development` enables error details
    /// - `AUTH_EMAIL` / `AUTH_PASSWORD`: override the accepted credential pair
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `BIND_ADDR` is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `BIND_ADDR` is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_raw
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: bind_raw.clone() })?;
        let mode = RunMode::parse(lookup("APP_ENV").or_else(|| lookup("NODE_ENV")).as_deref());
        let credentials = Credentials::new(
            lookup("AUTH_EMAIL").unwrap_or_else(|| DEFAULT_AUTH_EMAIL.to_owned()),
            lookup("AUTH_PASSWORD").unwrap_or_else(|| DEFAULT_AUTH_PASSWORD.to_owned()),
        );

        Ok(Self { bind_addr, port, mode, credentials })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
