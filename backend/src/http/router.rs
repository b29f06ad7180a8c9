//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::Request,
    http::{header, HeaderMap, Method},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::error::AppError;
use super::handlers;
use super::state::AppState;

/// Path of the passthrough relay.
pub const RELAY_PATH: &str = "/api/gas";
/// Path of the aligned chart dataset.
pub const CHART_PATH: &str = "/api/chart";

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    // Relay routes accept any method so non-GET requests get the JSON 405 body.
    // CorsLayer answers every OPTIONS request, so plain ones are stopped before it.
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(RELAY_PATH, any(handlers::relay_upstream))
        .route(CHART_PATH, any(handlers::get_chart))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(reject_plain_options))
        .with_state(state)
}

/// A CORS preflight names an `Origin` and the method it wants to use.
fn is_cors_preflight(headers: &HeaderMap) -> bool {
    headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Answer a non-preflight `OPTIONS` on the relay routes with the JSON 405.
async fn reject_plain_options(request: Request, next: Next) -> Response {
    let relay_route = matches!(request.uri().path(), RELAY_PATH | CHART_PATH);
    if relay_route && request.method() == Method::OPTIONS && !is_cors_preflight(request.headers())
    {
        warn!(method = %request.method(), path = %request.uri().path(), "Rejecting non-GET request");
        return AppError::MethodNotAllowed.into_response();
    }
    next.run(request).await
}
