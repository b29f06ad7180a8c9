//! Outbound call to the upstream script endpoint.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Raw upstream response, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// URL after redirects were followed.
    pub final_url: String,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain an upstream response at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// Seam between the relay and the network.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issue a single GET and buffer the response body.
    async fn get(&self, url: &str) -> Result<UpstreamResponse, TransportError>;
}

/// `reqwest`-backed client. Redirects are followed and the platform default
/// timeout applies.
#[derive(Debug, Clone, Default)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gas-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn get(&self, url: &str) -> Result<UpstreamResponse, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let final_url = response.url().to_string();
        let body = response.text().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            final_url,
            body,
        })
    }
}

/// Append the inbound query string to the configured base URL.
///
/// Uses `&` when the base already carries a query, `?` otherwise. An absent
/// or empty inbound query leaves the base untouched.
pub fn build_upstream_url(base: &str, query: Option<&str>) -> String {
    match query.map(|q| q.trim_start_matches('?')).filter(|q| !q.is_empty()) {
        Some(query) => {
            let sep = if base.contains('?') { '&' } else { '?' };
            format!("{base}{sep}{query}")
        }
        None => base.to_string(),
    }
}
