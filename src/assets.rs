//! Asset-serving strategies.
//!
//! Selected once at startup and baked into the router as its fallback:
//! production serves the pre-built bundle from disk, development proxies
//! asset requests to the hot-reloading bundler dev server.

use axum::{
    body::Body,
    extract::Request,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Uri,
    },
    response::Response,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use crate::config::{Config, Mode};
use crate::errors::AppError;

/// Installs the mode-selected asset strategy as the router fallback.
pub fn apply_asset_strategy(app: Router, config: &Config) -> Router {
    match config.mode {
        Mode::Production => {
            info!(dir = %config.static_dir.display(), "serving pre-built assets");
            let index = config.static_dir.join("index.html");
            app.fallback_service(
                ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)),
            )
        }
        Mode::Development => {
            info!(upstream = %config.dev_server_url, "proxying asset requests to dev server");
            let proxy = DevProxy::new(&config.dev_server_url);
            app.fallback(move |request: Request| {
                let proxy = proxy.clone();
                async move { proxy.forward(request).await }
            })
        }
    }
}

/// Reverse proxy to the bundler dev server.
///
/// Forwards method, path, query, headers and body unchanged; only scheme and
/// authority are rewritten.
#[derive(Clone)]
struct DevProxy {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl DevProxy {
    fn new(upstream: &str) -> Self {
        let authority = upstream
            .parse::<Uri>()
            .ok()
            .and_then(|uri| uri.into_parts().authority)
            .unwrap_or_else(|| {
                warn!(upstream, "invalid DEV_SERVER_URL, using default");
                Authority::from_static("127.0.0.1:5173")
            });
        Self {
            client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
            authority,
        }
    }

    async fn forward(&self, request: Request) -> Result<Response, AppError> {
        let (mut parts, body) = request.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(self.authority.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri =
            Uri::from_parts(uri_parts).map_err(|err| AppError::bad_gateway(err.to_string()))?;

        let response = self
            .client
            .request(Request::from_parts(parts, body))
            .await
            .map_err(|err| AppError::bad_gateway(err.to_string()))?;

        Ok(response.map(Body::new))
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::config::DEFAULT_DEV_SERVER_URL;

    use super::*;

    fn config(mode: Mode, dev_server_url: &str) -> Config {
        Config {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            mode,
            static_dir: "missing-assets".into(),
            dev_server_url: dev_server_url.to_string(),
        }
    }

    #[tokio::test]
    async fn production_unknown_asset_is_not_found_without_a_bundle() {
        let app = apply_asset_strategy(
            Router::new(),
            &config(Mode::Production, DEFAULT_DEV_SERVER_URL),
        );
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/static/logo.png")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dev_proxy_maps_unreachable_upstream_to_bad_gateway() {
        // port 1 is never listening
        let app = apply_asset_strategy(
            Router::new(),
            &config(Mode::Development, "http://127.0.0.1:1"),
        );
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/src/main.tsx")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn invalid_dev_server_url_falls_back_to_default_authority() {
        let proxy = DevProxy::new("not a url");
        assert_eq!(proxy.authority.as_str(), "127.0.0.1:5173");
    }
}
