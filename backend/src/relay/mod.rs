//! Relay of a single upstream script endpoint.
//!
//! ```text
//! inbound GET ──► forward() ──► UpstreamClient::get() ──► classify() ──► RelayOutcome
//! ```
//!
//! The relay core is independent of the HTTP server; turning a
//! [`RelayOutcome`] into a response lives in [`crate::http`].

pub mod classify;
pub mod forward;
pub mod outcome;
pub mod upstream;

pub use classify::{body_snippet, classify, BODY_SNIPPET_LIMIT};
pub use forward::forward;
pub use outcome::{NonJsonCause, RelayOutcome};
pub use upstream::{build_upstream_url, HttpUpstream, TransportError, UpstreamClient, UpstreamResponse};
