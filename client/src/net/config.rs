//! Client configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub connect_secs: u64,
    /// Whole-request budget: connect, write and read together.
    pub request_secs: u64,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self { connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS, request_secs: DEFAULT_REQUEST_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin without a trailing slash.
    pub base_url: String,
    pub timeouts: ClientTimeouts,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), timeouts: ClientTimeouts::default() }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: ClientTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Build client config from environment variables.
    ///
    /// Optional:
    /// - `AUTH_BASE_URL`: default `http://127.0.0.1:3000`
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 30
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable timeout values fall back to their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("AUTH_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let timeouts = ClientTimeouts {
            connect_secs: parse_u64(lookup("AUTH_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
            request_secs: parse_u64(lookup("AUTH_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
        };
        Self::new(base_url.trim()).with_timeouts(timeouts)
    }

    /// Absolute URL for an API path such as `/api/auth/login`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
