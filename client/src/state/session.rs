//! Observable login state.

use wire::UserRecord;

/// State of the current login attempt as rendered by the UI.
///
/// The synchronous field checks happen inside `login` before this ever leaves
/// `Idle`, so there is no separate validating state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(UserRecord),
    /// Human-readable failure message.
    Failed(String),
}

impl SessionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Succeeded(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
