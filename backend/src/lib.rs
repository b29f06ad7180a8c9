//! # GAS Relay
//!
//! A small relay in front of a hosted Apps Script ("GAS") web app that serves
//! view-count time series to a browser chart.
//!
//! ## Features
//!
//! - **Relay**: forward `GET /api/gas` to the configured upstream and pass its
//!   JSON through, with a structured error envelope for every failure mode
//! - **Alignment**: merge sparse, unaligned series onto one sorted date axis
//!   with explicit gaps and position-stable colors
//! - **HTTP API**: axum server exposing the relay, the aligned chart dataset
//!   and a health check
//!
//! ## Architecture
//!
//! - [`config`]: configuration from `relay.toml` and the environment
//! - [`relay`]: upstream call and response classification
//! - [`models`]: upstream series, aligned dataset, palette, legend state
//! - [`services`]: series alignment
//! - [`http`]: axum router, handlers and error envelopes

pub mod config;
pub mod models;
pub mod relay;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
