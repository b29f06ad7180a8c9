use serde::{Deserialize, Serialize};

use crate::config::Locale;

/// Line styling applied to every series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub tension: f64,
    pub point_radius: u32,
    /// Lower bound of the value axis.
    pub y_min: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            tension: 0.25,
            point_radius: 2,
            y_min: 0.0,
        }
    }
}

/// Axis captions shown next to the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTitles {
    pub x: String,
    pub y: String,
}

impl AxisTitles {
    pub fn for_locale(locale: Locale) -> Self {
        let (x, y) = match locale {
            Locale::Ja => ("日付", "再生数"),
            Locale::En => ("Date", "Views"),
        };
        Self {
            x: x.to_string(),
            y: y.to_string(),
        }
    }
}

/// Title used for a series the upstream left unnamed (`position` is 1-based).
pub fn fallback_title(position: usize, locale: Locale) -> String {
    match locale {
        Locale::Ja => format!("シリーズ {position}"),
        Locale::En => format!("Series {position}"),
    }
}
