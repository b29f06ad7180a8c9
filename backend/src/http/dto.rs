//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::config::Locale;
pub use crate::models::{AlignedDataset, AlignedSeries, AxisTitles, LineStyle};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// `configured` or `missing`
    pub upstream: String,
}

/// Chart-ready response for the aligned endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    #[serde(flatten)]
    pub dataset: AlignedDataset,
    pub style: LineStyle,
    pub axes: AxisTitles,
}

impl ChartResponse {
    pub fn new(dataset: AlignedDataset, locale: Locale) -> Self {
        Self {
            dataset,
            style: LineStyle::default(),
            axes: AxisTitles::for_locale(locale),
        }
    }
}
