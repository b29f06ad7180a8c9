//! HTTP server module for the relay.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Method check, raw query extraction                     │
//! │  - RelayOutcome → status, headers, JSON envelope          │
//! │  - CORS, compression, tracing                             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Relay (relay/)                                           │
//! │  - URL building, single upstream GET, classification      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Services (services/)                                     │
//! │  - Series alignment for the chart endpoint                │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

#[cfg(test)]
#[path = "router_tests.rs"]
mod router_tests;

pub use router::{create_router, CHART_PATH, RELAY_PATH};
pub use state::AppState;
