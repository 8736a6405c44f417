//! Auth routes: email/password login.
//!
//! The body is accepted as JSON or as a urlencoded form. A JSON body must be
//! an object or an array; any other document, or broken syntax, is an
//! unhandled error (500). Field values follow the front-end's loose typing:
//! `null`, `""`, `false` and `0` count as absent (400), while any other
//! non-string value is present but can never match (401).

use std::panic::AssertUnwindSafe;

use axum::body::Bytes;
use axum::extract::{FromRef, FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::Json;
use axum::Form;
use futures::FutureExt;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use wire::{ApiResponse, AuthResult, Credentials, FailureReason};

use crate::error::{ApiError, ApiFailure, panic_message};
use crate::services::credentials;
use crate::state::AppState;

/// One submitted login field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Absent,
    Text(String),
    /// Present, but not a string. Never equal to a stored credential.
    Opaque,
}

impl LoginField {
    fn from_json(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => Self::Absent,
            Value::String(s) if s.is_empty() => Self::Absent,
            Value::String(s) => Self::Text(s),
            Value::Number(n) if n.as_f64() == Some(0.0) => Self::Absent,
            _ => Self::Opaque,
        }
    }

    fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<'de> Deserialize<'de> for LoginField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.map_or(Self::Absent, Self::from_json))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: LoginField,
    #[serde(default)]
    pub password: LoginField,
}

impl LoginPayload {
    /// Both fields as text, or the refusal they already imply.
    ///
    /// # Errors
    ///
    /// `MissingFields` when either field is absent, otherwise
    /// `InvalidCredentials` when either is not a string.
    pub fn into_credentials(self) -> Result<Credentials, FailureReason> {
        if self.email.is_absent() || self.password.is_absent() {
            return Err(FailureReason::MissingFields);
        }
        match (self.email, self.password) {
            (LoginField::Text(email), LoginField::Text(password)) => Ok(Credentials::new(email, password)),
            _ => Err(FailureReason::InvalidCredentials),
        }
    }
}

// =============================================================================
// BODY EXTRACTOR
// =============================================================================

/// Login body decoded according to `Content-Type`.
pub struct LoginBody(pub LoginPayload);

impl<S> FromRequest<S> for LoginBody
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mode = AppState::from_ref(state).mode;
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            return match Form::<LoginPayload>::from_request(req, state).await {
                Ok(Form(payload)) => Ok(Self(payload)),
                Err(rejection) => {
                    tracing::debug!(error = %rejection.body_text(), "unusable form body");
                    Ok(Self(LoginPayload::default()))
                }
            };
        }

        if !content_type.starts_with("application/json") {
            return Ok(Self(LoginPayload::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Unhandled(e.body_text()).in_mode(mode))?;
        parse_json_body(&bytes).map(Self).map_err(|e| e.in_mode(mode))
    }
}

/// Decode a JSON login body. An empty body or a top-level array yields an
/// empty payload; syntax errors and scalar documents are unhandled.
pub(crate) fn parse_json_body(bytes: &[u8]) -> Result<LoginPayload, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(LoginPayload::default());
    }
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ApiError::Unhandled(e.to_string()))?;
    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(|e| ApiError::Unhandled(e.to_string())),
        Value::Array(_) => Ok(LoginPayload::default()),
        other => Err(ApiError::Unhandled(format!("login body must be an object, got {other}"))),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: check credentials, return user + map seed.
///
/// A panic while checking credentials is answered like a store failure.
pub async fn login(
    State(state): State<AppState>,
    LoginBody(payload): LoginBody,
) -> Result<Json<ApiResponse>, ApiFailure> {
    let submitted = match payload.into_credentials() {
        Ok(submitted) => submitted,
        Err(reason) => {
            tracing::debug!(%reason, "login rejected before lookup");
            return Err(ApiError::Rejected(reason).in_mode(state.mode));
        }
    };

    let check = credentials::authenticate(state.credentials.as_ref(), &submitted.email, &submitted.password);
    let result = match AssertUnwindSafe(check).catch_unwind().await {
        Ok(result) => result.map_err(|e| ApiError::from(e).in_mode(state.mode))?,
        Err(panic) => return Err(ApiError::LoginFailed(panic_message(panic.as_ref())).in_mode(state.mode)),
    };

    match result {
        AuthResult::Failure { reason } => Err(ApiError::Rejected(reason).in_mode(state.mode)),
        success @ AuthResult::Success { .. } => Ok(Json(success.into())),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
