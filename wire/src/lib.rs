//! Shared login contract for the auth `server` and the `client` controller.
//!
//! This crate owns the JSON shapes exchanged on `POST /api/auth/login` and the
//! domain types both sides build from them. Wire field names follow what the
//! mobile front-end reads (`name`, `mapData`, `initialLocation`), so the Rust
//! field names and the JSON keys differ in a few places.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Route of the single authentication endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login";

pub const MSG_LOGIN_OK: &str = "Inicio de sesión exitoso";
pub const MSG_ROUTE_NOT_FOUND: &str = "Ruta no encontrada";
pub const MSG_LOGIN_FAILED_INTERNAL: &str = "Error en el servidor";
pub const MSG_UNHANDLED_INTERNAL: &str = "Error interno del servidor";

pub const DEFAULT_CENTER_LATITUDE: f64 = 19.432_608;
pub const DEFAULT_CENTER_LONGITUDE: f64 = -99.133_209;
pub const DEFAULT_ZOOM: u32 = 15;

// =============================================================================
// CREDENTIALS
// =============================================================================

/// One login submission. Transient; never persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// Both fields are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// USER + MAP SEED
// =============================================================================

/// The authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

/// A single pin on the map screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Older servers emit numeric ids; both forms are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
}

/// Initial viewport and markers for the map screen.
///
/// Serialized as `{ "initialLocation": { latitude, longitude, zoom }, "markers": [...] }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "MapData", into = "MapData")]
pub struct MapSeed {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u32,
    pub markers: Vec<Marker>,
}

impl MapSeed {
    /// The fixed seed handed out on every successful login: one marker at the
    /// default center.
    #[must_use]
    pub fn default_seed() -> Self {
        Self {
            center_latitude: DEFAULT_CENTER_LATITUDE,
            center_longitude: DEFAULT_CENTER_LONGITUDE,
            zoom: DEFAULT_ZOOM,
            markers: vec![Marker {
                id: "1".to_owned(),
                latitude: DEFAULT_CENTER_LATITUDE,
                longitude: DEFAULT_CENTER_LONGITUDE,
                title: "Marcador de ejemplo".to_owned(),
            }],
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapData {
    initial_location: InitialLocation,
    #[serde(default)]
    markers: Vec<Marker>,
}

#[derive(Clone, Serialize, Deserialize)]
struct InitialLocation {
    latitude: f64,
    longitude: f64,
    zoom: u32,
}

impl From<MapData> for MapSeed {
    fn from(data: MapData) -> Self {
        Self {
            center_latitude: data.initial_location.latitude,
            center_longitude: data.initial_location.longitude,
            zoom: data.initial_location.zoom,
            markers: data.markers,
        }
    }
}

impl From<MapSeed> for MapData {
    fn from(seed: MapSeed) -> Self {
        Self {
            initial_location: InitialLocation {
                latitude: seed.center_latitude,
                longitude: seed.center_longitude,
                zoom: seed.zoom,
            },
            markers: seed.markers,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

// =============================================================================
// AUTH RESULT
// =============================================================================

/// Why an authentication attempt was refused. `Display` yields the message
/// sent to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    #[error("Por favor, proporcione correo electrónico y contraseña")]
    MissingFields,
    #[error("Credenciales inválidas")]
    InvalidCredentials,
}

/// Outcome of one credential check.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthResult {
    Success { user: UserRecord, map_seed: MapSeed },
    Failure { reason: FailureReason },
}

impl AuthResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

// =============================================================================
// RESPONSE ENVELOPES
// =============================================================================

/// JSON envelope shared by the login endpoint, its error replies and the 404
/// fallback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_data: Option<MapSeed>,
    /// Internal failure detail; only meaningful on 500 replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub fn success(user: UserRecord, map_seed: MapSeed) -> Self {
        Self {
            success: true,
            message: MSG_LOGIN_OK.to_owned(),
            user: Some(user),
            map_data: Some(map_seed),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), user: None, map_data: None, error: None }
    }

    #[must_use]
    pub fn with_error(mut self, error: Value) -> Self {
        self.error = Some(error);
        self
    }
}

impl From<AuthResult> for ApiResponse {
    fn from(result: AuthResult) -> Self {
        match result {
            AuthResult::Success { user, map_seed } => Self::success(user, map_seed),
            AuthResult::Failure { reason } => Self::failure(reason.to_string()),
        }
    }
}

/// Liveness payload served at `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
