//! Login session controller.
//!
//! DESIGN
//! ======
//! All observable values live in `tokio::sync::watch` channels: the controller
//! is the single writer, any number of UI components read. The state channel's
//! internal lock also serializes the transitions that must be atomic with
//! respect to each other (start of an attempt, reset, settlement), so no
//! extra mutex is needed.
//!
//! At most one request is in flight. `in_flight` is the guard; it stays set
//! until the request settles even if the UI resets the visible state in the
//! meantime. A reset bumps `generation`, and a request only publishes its
//! result if the generation it started under is still current.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use wire::{Credentials, MapSeed};

use super::session::SessionState;
use super::validation;
use crate::net::api::{AuthApi, HttpAuthApi, LoginSuccess};
use crate::net::config::ClientConfig;
use crate::net::error::{ClientBuildError, LoginError};

/// Owns the [`SessionState`] for one login screen. Cheap to clone; clones
/// share the same session.
#[derive(Clone)]
pub struct LoginController {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn AuthApi>,
    runtime: Handle,
    state: watch::Sender<SessionState>,
    email_error: watch::Sender<Option<String>>,
    password_error: watch::Sender<Option<String>>,
    map_seed: watch::Sender<Option<MapSeed>>,
    in_flight: AtomicBool,
    generation: AtomicU64,
}

impl LoginController {
    /// Requests are spawned on `runtime`, so `login` may be called from any
    /// thread.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                runtime,
                state: watch::channel(SessionState::Idle).0,
                email_error: watch::channel(None).0,
                password_error: watch::channel(None).0,
                map_seed: watch::channel(None).0,
                in_flight: AtomicBool::new(false),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Controller talking HTTP to the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig, runtime: Handle) -> Result<Self, ClientBuildError> {
        Ok(Self::new(Arc::new(HttpAuthApi::new(config)?), runtime))
    }

    // =========================================================================
    // OBSERVABLES
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn email_error(&self) -> Option<String> {
        self.inner.email_error.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_email_error(&self) -> watch::Receiver<Option<String>> {
        self.inner.email_error.subscribe()
    }

    #[must_use]
    pub fn password_error(&self) -> Option<String> {
        self.inner.password_error.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_password_error(&self) -> watch::Receiver<Option<String>> {
        self.inner.password_error.subscribe()
    }

    /// Map seed from the last successful login. Survives `reset_state` so the
    /// map screen can read it after the login screen has moved on.
    #[must_use]
    pub fn map_seed(&self) -> Option<MapSeed> {
        self.inner.map_seed.borrow().clone()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Check the email field and publish its error (or clear it).
    pub fn validate_email(&self, email: &str) -> bool {
        let result = validation::check_email(email);
        self.inner.email_error.send_replace(result.err().map(|e| e.to_string()));
        result.is_ok()
    }

    /// Check the password field and publish its error (or clear it).
    pub fn validate_password(&self, password: &str) -> bool {
        let result = validation::check_password(password);
        self.inner.password_error.send_replace(result.err().map(|e| e.to_string()));
        result.is_ok()
    }

    /// Validate and submit. Returns the handle of the spawned request, or
    /// `None` when the call was ignored (request already in flight) or
    /// rejected locally (field errors published).
    pub fn login(&self, email: &str, password: &str) -> Option<JoinHandle<()>> {
        if self.inner.in_flight.load(Ordering::Acquire) {
            tracing::debug!("login ignored: request already in flight");
            return None;
        }

        // Run both so both fields show their errors.
        let email_ok = self.validate_email(email);
        let password_ok = self.validate_password(password);
        if !(email_ok && password_ok) {
            return None;
        }

        if self
            .inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("login ignored: request already in flight");
            return None;
        }

        let mut generation = 0;
        self.inner.map_seed.send_replace(None);
        self.inner.state.send_modify(|state| {
            generation = self.inner.generation.load(Ordering::Acquire);
            *state = SessionState::Submitting;
        });

        let credentials = Credentials::new(email, password);
        let attempt = Attempt { inner: Arc::clone(&self.inner), generation, settled: false };
        Some(self.inner.runtime.spawn(async move {
            let outcome = attempt.inner.api.login(&credentials).await;
            attempt.settle(outcome);
        }))
    }

    /// Force the state back to `Idle`. A request still in flight keeps the
    /// submission guard but its result is dropped.
    pub fn reset_state(&self) {
        self.inner.state.send_modify(|state| {
            self.inner.generation.fetch_add(1, Ordering::AcqRel);
            *state = SessionState::Idle;
        });
    }

    /// The user edited a field: clear a displayed failure.
    pub fn input_changed(&self) {
        self.inner.state.send_if_modified(|state| {
            if matches!(state, SessionState::Failed(_)) {
                *state = SessionState::Idle;
                return true;
            }
            false
        });
    }
}

// =============================================================================
// IN-FLIGHT ATTEMPT
// =============================================================================

/// One dispatched request. Settles exactly once: normally via [`Attempt::settle`],
/// or from `Drop` if the request task panicked or was aborted.
struct Attempt {
    inner: Arc<Inner>,
    generation: u64,
    settled: bool,
}

impl Attempt {
    fn settle(mut self, outcome: Result<LoginSuccess, LoginError>) {
        self.settled = true;
        self.inner.publish(self.generation, outcome);
    }
}

impl Drop for Attempt {
    fn drop(&mut self) {
        if !self.settled {
            self.inner.publish(self.generation, Err(LoginError::transport("")));
        }
    }
}

impl Inner {
    fn publish(&self, generation: u64, outcome: Result<LoginSuccess, LoginError>) {
        self.state.send_if_modified(|state| {
            self.in_flight.store(false, Ordering::Release);
            if self.generation.load(Ordering::Acquire) != generation {
                tracing::debug!("discarding login result after reset");
                return false;
            }
            *state = match outcome {
                Ok(success) => {
                    tracing::debug!(user_id = %success.user.id, "login succeeded");
                    self.map_seed
                        .send_replace(Some(success.map_seed.unwrap_or_else(MapSeed::default_seed)));
                    SessionState::Succeeded(success.user)
                }
                Err(err) => {
                    if err.is_transport() {
                        tracing::warn!(error = %err, "login transport fault");
                    } else {
                        tracing::debug!(error = %err, "login refused");
                    }
                    SessionState::Failed(err.to_string())
                }
            };
            true
        });
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
