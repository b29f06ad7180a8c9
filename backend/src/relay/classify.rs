//! Classification of a buffered upstream response into a [`RelayOutcome`].

use url::Url;

use super::outcome::{NonJsonCause, RelayOutcome};
use super::upstream::UpstreamResponse;

/// Maximum number of characters of a non-JSON body echoed to the client.
pub const BODY_SNIPPET_LIMIT: usize = 500;

const LOGIN_HOSTS: &[&str] = &["accounts.google.com"];
const LOGIN_PATH_MARKERS: &[&str] = &["servicelogin", "login", "signin", "auth"];

/// Classify an upstream response. First match wins:
/// non-2xx status, then non-JSON content type, then JSON parsing.
pub fn classify(response: UpstreamResponse) -> RelayOutcome {
    if !response.is_success() {
        return RelayOutcome::UpstreamError {
            status: response.status,
            body: response.body,
        };
    }

    let content_type = response.content_type.unwrap_or_default();
    if !is_json_content_type(&content_type) {
        let cause = if looks_like_html(&response.body)
            || looks_like_login_redirect(&response.final_url)
        {
            NonJsonCause::LikelyAuthRedirect
        } else {
            NonJsonCause::Other
        };
        return RelayOutcome::NonJsonResponse {
            content_type,
            body: response.body,
            final_url: response.final_url,
            cause,
        };
    }

    match serde_json::from_str(&response.body) {
        Ok(json) => RelayOutcome::Success(json),
        Err(e) => RelayOutcome::TransportError(format!("Invalid JSON from upstream: {e}")),
    }
}

pub fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains("application/json")
}

/// Whether the body starts like an HTML document.
pub fn looks_like_html(body: &str) -> bool {
    let head: String = body
        .trim_start()
        .chars()
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Whether the final URL points at a sign-in page.
pub fn looks_like_login_redirect(final_url: &str) -> bool {
    let Ok(url) = Url::parse(final_url) else {
        return false;
    };
    if url
        .host_str()
        .is_some_and(|host| LOGIN_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)))
    {
        return true;
    }
    let path = url.path().to_ascii_lowercase();
    LOGIN_PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

/// First [`BODY_SNIPPET_LIMIT`] characters of `body`.
pub fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LIMIT).collect()
}
