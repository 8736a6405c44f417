//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! credential store sits behind a trait object so a real store (or a test
//! fake) plugs in without touching the routes.

use std::sync::Arc;

use crate::config::{RunMode, ServerConfig};
use crate::services::credentials::{CredentialStore, StaticCredentialStore};

/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub mode: RunMode,
}

impl AppState {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, mode: RunMode) -> Self {
        Self { credentials, mode }
    }

    /// State backed by the single configured credential pair.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(Arc::new(StaticCredentialStore::new(config.credentials.clone())), config.mode)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
