//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One JSON API for the mobile front-end: `POST /api/auth/login` plus a
//! liveness payload at `/`. Every other path, and every other method on a
//! known path, answers with the 404 envelope.
//!
//! Layers, outermost first: access log (`TraceLayer`), permissive CORS, and a
//! panic catcher that turns handler panics into the 500 envelope.

pub mod auth;

use std::any::Any;

use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use wire::{LOGIN_PATH, ServiceInfo};

use crate::config::RunMode;
use crate::error::{ApiError, ApiFailure, panic_message};
use crate::state::AppState;

const SERVICE_WELCOME: &str = "Bienvenido a la API de Inovisec";
const SERVICE_VERSION: &str = "1.0.0";

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let mode = state.mode;
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);
    let access_log = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(root).fallback(not_found))
        .route(LOGIN_PATH, post(auth::login).fallback(not_found))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, mode)))
        .layer(cors)
        .layer(access_log)
        .with_state(state)
}

/// `GET /`: static liveness payload.
async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_WELCOME.to_owned(),
        version: SERVICE_VERSION.to_owned(),
        status: "online".to_owned(),
    })
}

async fn not_found(State(state): State<AppState>) -> ApiFailure {
    ApiError::NotFound.in_mode(state.mode)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, mode: RunMode) -> Response {
    ApiError::Unhandled(panic_message(panic.as_ref())).in_mode(mode).into_response()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
