//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::relay::UpstreamClient;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Configuration resolved at startup
    pub config: Arc<RelayConfig>,
    /// Client used for the single upstream call per request
    pub upstream: Arc<dyn UpstreamClient>,
}

impl AppState {
    /// Create a new application state with the given configuration and client.
    pub fn new(config: RelayConfig, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}
