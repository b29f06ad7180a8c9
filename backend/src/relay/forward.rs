use tracing::{debug, error, warn};

use super::classify::{body_snippet, classify};
use super::outcome::RelayOutcome;
use super::upstream::{build_upstream_url, UpstreamClient};
use crate::config::UPSTREAM_URL_ENV;

/// Run one relay attempt: build the upstream URL, issue a single GET and
/// classify the result.
///
/// Never retries. A missing `upstream_base` short-circuits before any
/// network call. Every non-success outcome is logged here.
pub async fn forward(
    upstream_base: Option<&str>,
    query: Option<&str>,
    client: &dyn UpstreamClient,
) -> RelayOutcome {
    let Some(base) = upstream_base else {
        let outcome = RelayOutcome::ConfigError;
        error!(
            outcome = outcome.kind(),
            variable = UPSTREAM_URL_ENV,
            "Upstream URL is not configured"
        );
        return outcome;
    };

    let url = build_upstream_url(base, query);
    debug!(url = %url, "Forwarding request upstream");

    let response = match client.get(&url).await {
        Ok(response) => response,
        Err(e) => {
            let outcome = RelayOutcome::TransportError(e.to_string());
            error!(outcome = outcome.kind(), url = %url, error = %e, "Upstream fetch failed");
            return outcome;
        }
    };

    let outcome = classify(response);
    log_outcome(&outcome, &url);
    outcome
}

fn log_outcome(outcome: &RelayOutcome, url: &str) {
    match outcome {
        RelayOutcome::Success(_) => {
            debug!(outcome = outcome.kind(), url = %url, "Upstream returned JSON");
        }
        RelayOutcome::UpstreamError { status, body } => {
            warn!(
                outcome = outcome.kind(),
                url = %url,
                status = *status,
                body = %body_snippet(body),
                "Upstream returned non-success status"
            );
        }
        RelayOutcome::NonJsonResponse {
            content_type,
            final_url,
            cause,
            ..
        } => {
            warn!(
                outcome = outcome.kind(),
                url = %url,
                content_type = %content_type,
                final_url = %final_url,
                cause = ?cause,
                "Upstream returned a non-JSON response"
            );
        }
        RelayOutcome::TransportError(message) => {
            error!(
                outcome = outcome.kind(),
                url = %url,
                error = %message,
                "Upstream response could not be read"
            );
        }
        // Logged by `forward` before any request is made.
        RelayOutcome::ConfigError => {}
    }
}
