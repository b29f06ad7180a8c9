//! Data model for upstream series and the chart-ready dataset.

pub mod chart;
pub mod legend;
pub mod palette;
pub mod series;
pub mod time;

pub use chart::{AxisTitles, LineStyle};
pub use legend::LegendState;
pub use series::{AlignedDataset, AlignedSeries, SeriesPoint, UpstreamSeries};
