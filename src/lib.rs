use axum::{extract::DefaultBodyLimit, middleware, Router};

pub mod assets;
pub mod config;
pub mod errors;
pub mod http;
pub mod invoke;
pub mod logging;

use config::{Config, Mode};

// Matches the classic body-parser ceiling for JSON APIs.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub mode: Mode,
}

/// Builds the full request pipeline with the built-in API routes.
pub fn build_app(config: &Config) -> Router {
    let api = http::handlers::api_router().with_state(AppState { mode: config.mode });
    build_app_with_api(api, config)
}

/// Builds the pipeline around a caller-supplied API router.
///
/// The API router is nested under `/api`, the mode-selected asset strategy
/// becomes the fallback, and the access-log middleware wraps everything so it
/// observes API and asset traffic alike.
pub fn build_app_with_api(api: Router, config: &Config) -> Router {
    let app = Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));
    let app = assets::apply_asset_strategy(app, config);
    app.layer(middleware::from_fn(logging::access_log))
}
