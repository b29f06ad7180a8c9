//! HTTP handlers for the relay endpoints.
//!
//! Handlers only extract the request, delegate to [`crate::relay::forward`]
//! and render the resulting [`RelayOutcome`].

use axum::{
    extract::{RawQuery, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use super::dto::{ChartResponse, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::config::Locale;
use crate::relay::{forward, RelayOutcome};
use crate::services::alignment::align_payload;

/// Cache hint attached to every successful response.
pub const CACHE_CONTROL_VALUE: &str = "s-maxage=300, stale-while-revalidate=60";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream = if state.config.upstream_url().is_some() {
        "configured"
    } else {
        "missing"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: upstream.to_string(),
    })
}

// =============================================================================
// Relay
// =============================================================================

/// GET /api/gas
///
/// Pass the upstream JSON through unmodified.
pub async fn relay_upstream(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(e) = require_get(&method) {
        return e.into_response();
    }
    let outcome = forward(
        state.config.upstream_url(),
        query.as_deref(),
        state.upstream.as_ref(),
    )
    .await;
    render_outcome(outcome, state.config.locale)
}

/// GET /api/chart
///
/// Relay the upstream payload and align its series server-side.
pub async fn get_chart(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(e) = require_get(&method) {
        return e.into_response();
    }
    let locale = state.config.locale;
    let outcome = forward(
        state.config.upstream_url(),
        query.as_deref(),
        state.upstream.as_ref(),
    )
    .await;

    match AppError::from_outcome(outcome, locale) {
        Ok(payload) => {
            let dataset = align_payload(&payload, locale);
            cached(ChartResponse::new(dataset, locale))
        }
        Err(e) => e.into_response(),
    }
}

/// Build the client response for a relay outcome.
///
/// Pure: the same outcome always yields the same status, headers and body.
pub fn render_outcome(outcome: RelayOutcome, locale: Locale) -> Response {
    match AppError::from_outcome(outcome, locale) {
        Ok(json) => cached(json),
        Err(e) => e.into_response(),
    }
}

fn require_get(method: &Method) -> Result<(), AppError> {
    if *method == Method::GET {
        Ok(())
    } else {
        warn!(method = %method, "Rejecting non-GET request");
        Err(AppError::MethodNotAllowed)
    }
}

fn cached<T: Serialize>(body: T) -> Response {
    ([(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)], Json(body)).into_response()
}
