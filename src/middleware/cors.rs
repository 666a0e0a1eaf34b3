//! CORS policy for the survey front end.
//!
//! Responsibility:
//! - Allow only the configured origins (exact match), `GET`/`POST`,
//!   and the `Origin`/`Content-Type` request headers.
//! - No credentials.
//!
//! The default allow-list lives in `config::DEFAULT_CORS_ALLOWED_ORIGINS`.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

pub fn layer(config: &Config) -> CorsLayer {
    // An empty allow-list allows no cross-origin callers at all.
    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(60 * 10))
}

/// Apply CORS policy to the given Router.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}
