//! Client error taxonomy.

/// Message used when a transport fault carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Error desconocido";

/// Why a login attempt did not produce a user. `Display` is the text the UI
/// shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("{message}")]
    MissingFields { message: String },
    #[error("{message}")]
    InvalidCredentials { message: String },
    #[error("{message}")]
    ServerInternal { message: String },
    /// Timeout, refused connection, unreadable reply.
    #[error("{0}")]
    Transport(String),
}

impl LoginError {
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::Transport(UNKNOWN_ERROR.to_owned());
        }
        Self::Transport(message)
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for LoginError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("HTTP client build failed: {0}")]
pub struct ClientBuildError(pub String);
