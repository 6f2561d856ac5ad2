//! Log output and per-request observation.
//!
//! API responses sent through [`LoggedJson`] leave a copy of their serialized
//! payload in the response extensions; [`access_log`] picks it up after the
//! inner service finishes and emits one bounded line per eligible request.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Path prefix that makes a request eligible for access logging. Everything
/// else (static assets, bundler traffic) passes through silently.
pub const API_PREFIX: &str = "/api";

const MAX_LINE_LEN: usize = 80;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Serialized JSON body captured from a [`LoggedJson`] response.
///
/// Set at most once per request; absent when the handler never sent a JSON
/// body (file responses, redirects, proxied assets).
#[derive(Debug, Clone)]
pub struct CapturedJson(pub Bytes);

/// JSON responder that also records what it sent.
///
/// Serializes the value once, transmits those exact bytes (identical to what
/// `axum::Json` would send), and stores a cheap clone of them in the response
/// extensions for the access log. Observation never alters the response.
#[derive(Debug)]
pub struct LoggedJson<T>(pub T);

impl<T: Serialize> IntoResponse for LoggedJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => {
                let bytes = Bytes::from(body);
                let mut response = (
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("application/json"),
                    )],
                    bytes.clone(),
                )
                    .into_response();
                response.extensions_mut().insert(CapturedJson(bytes));
                response
            }
            Err(err) => {
                tracing::error!(error = %err, "response payload failed to serialize");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

/// Access-log middleware, layered outermost in the pipeline.
///
/// Times the request, runs the inner service, and for API-prefixed paths
/// emits one log line carrying status, latency and any captured payload.
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;

    if path.starts_with(API_PREFIX) {
        let payload = response
            .extensions()
            .get::<CapturedJson>()
            .map(|captured| String::from_utf8_lossy(&captured.0).into_owned());
        let line = format_log_line(
            &method,
            &path,
            response.status(),
            started_at.elapsed().as_millis(),
            payload.as_deref(),
        );
        info!("{line}");
    }

    response
}

/// Builds the access-log line: `{method} {path} {status} in {duration}ms`,
/// followed by ` :: {payload}` when one was captured. Lines longer than 80
/// characters are cut to 79 plus a trailing ellipsis.
pub fn format_log_line(
    method: &Method,
    path: &str,
    status: StatusCode,
    duration_ms: u128,
    payload: Option<&str>,
) -> String {
    let mut line = format!("{method} {path} {} in {duration_ms}ms", status.as_u16());
    if let Some(payload) = payload {
        line.push_str(" :: ");
        line.push_str(payload);
    }
    if line.chars().count() > MAX_LINE_LEN {
        line = line.chars().take(MAX_LINE_LEN - 1).collect();
        line.push('…');
    }
    line
}
