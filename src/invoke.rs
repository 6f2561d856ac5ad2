//! Stateless invocation adapter.
//!
//! Exposes the fully built pipeline as a single callable for function-hosting
//! runtimes (and tests): each invocation drives one request through exactly
//! the same router the TCP listener serves.

use axum::{extract::Request, response::Response, Router};
use tower::ServiceExt;

use crate::config::Config;

#[derive(Clone)]
pub struct InvocationAdapter {
    app: Router,
}

impl InvocationAdapter {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(crate::build_app(config))
    }

    /// Handles one translated platform event as an HTTP request.
    ///
    /// Routers are cheap to clone, so the adapter carries no per-invocation
    /// state.
    pub async fn invoke(&self, request: Request) -> Response {
        match self.app.clone().oneshot(request).await {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::{body::Body, http::StatusCode};
    use http_body_util::BodyExt;

    use crate::config::{Mode, DEFAULT_DEV_SERVER_URL};

    use super::*;

    fn config() -> Config {
        Config {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            mode: Mode::Production,
            static_dir: "missing-assets".into(),
            dev_server_url: DEFAULT_DEV_SERVER_URL.to_string(),
        }
    }

    #[tokio::test]
    async fn adapter_serves_repeated_invocations() {
        let adapter = InvocationAdapter::from_config(&config());

        for _ in 0..3 {
            let response = adapter
                .invoke(
                    Request::builder()
                        .uri("/api/health")
                        .body(Body::empty())
                        .expect("request build"),
                )
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            let body = response
                .into_body()
                .collect()
                .await
                .expect("collect body")
                .to_bytes();
            assert_eq!(body, "{\"status\":\"ok\"}");
        }
    }
}
