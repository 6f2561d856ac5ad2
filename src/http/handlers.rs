//! Axum HTTP handlers for the built-in API surface.
//!
//! Application routes are expected to be merged alongside these; everything
//! here responds through [`LoggedJson`] so the access log sees the payload.

use axum::{extract::State, routing::get, Router};
use serde::Serialize;

use crate::logging::LoggedJson;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
}

pub async fn health() -> LoggedJson<HealthResponse> {
    LoggedJson(HealthResponse { status: "ok" })
}

pub async fn info(State(state): State<AppState>) -> LoggedJson<InfoResponse> {
    LoggedJson(InfoResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        mode: state.mode.as_str(),
    })
}
