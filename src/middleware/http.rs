//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits
//! - Global timeouts
//!
//! Limits come from `Config` (`REQUEST_BODY_LIMIT_BYTES`, `REQUEST_TIMEOUT_SECONDS`).

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::header::HeaderName;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct HttpLimits {
    pub body_limit: usize,
    pub timeout: Duration,
}

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router, limits: HttpLimits) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Outside HandleErrorLayer so timeout responses carry the request id too.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        // Make the service error `Infallible` by converting errors into JSON error responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                AppError::Timeout
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                AppError::Internal(err.to_string())
            }
        }))
        // Replaces axum's 2 MiB default; oversized bodies surface through `ApiJson` as 413 JSON.
        .layer(DefaultBodyLimit::max(limits.body_limit))
        .layer(TimeoutLayer::new(limits.timeout))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}
