//! Credential validation.
//!
//! DESIGN
//! ======
//! `authenticate` owns the contract: field presence checks, the store lookup
//! and the success payload. The store behind [`CredentialStore`] only answers
//! "which user is this pair". Today that is a single configured pair, and
//! callers never see the difference when a real store replaces it.
//!
//! The map seed attached to a success is the same for every user.

use wire::{AuthResult, Credentials, FailureReason, MapSeed, UserRecord};

const USER_ID: &str = "1";
const USER_DISPLAY_NAME: &str = "Usuario de Prueba";

#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of the user owning an email/password pair.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Return the matching user, or `None` when the pair is not recognised.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialStoreError`] when the store itself fails. A wrong
    /// password is not an error.
    async fn lookup(&self, email: &str, password: &str) -> Result<Option<UserRecord>, CredentialStoreError>;
}

/// Store that accepts exactly one configured pair, compared byte for byte.
pub struct StaticCredentialStore {
    accepted: Credentials,
}

impl StaticCredentialStore {
    #[must_use]
    pub fn new(accepted: Credentials) -> Self {
        Self { accepted }
    }
}

#[async_trait::async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn lookup(&self, email: &str, password: &str) -> Result<Option<UserRecord>, CredentialStoreError> {
        if email != self.accepted.email || password != self.accepted.password {
            return Ok(None);
        }
        Ok(Some(UserRecord {
            id: USER_ID.to_owned(),
            email: email.to_owned(),
            display_name: USER_DISPLAY_NAME.to_owned(),
        }))
    }
}

/// Check one submission against `store`.
///
/// Empty fields fail with [`FailureReason::MissingFields`] before the store is
/// consulted.
///
/// # Errors
///
/// Propagates store failures; the caller maps them to a 500.
pub async fn authenticate(
    store: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> Result<AuthResult, CredentialStoreError> {
    if email.is_empty() || password.is_empty() {
        tracing::debug!("login rejected: missing fields");
        return Ok(AuthResult::Failure { reason: FailureReason::MissingFields });
    }

    match store.lookup(email, password).await? {
        Some(user) => {
            tracing::debug!(user_id = %user.id, "login accepted");
            Ok(AuthResult::Success { user, map_seed: MapSeed::default_seed() })
        }
        None => {
            tracing::debug!(%email, "login rejected: invalid credentials");
            Ok(AuthResult::Failure { reason: FailureReason::InvalidCredentials })
        }
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
