//! Service layer for data shaping.
//!
//! Services are pure functions over the data model; the HTTP layer calls them
//! after the relay has produced an upstream payload.

pub mod alignment;


pub use alignment::{align_payload, align_series};
