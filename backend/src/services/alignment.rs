//! Alignment of sparse upstream series onto one shared date axis.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::config::Locale;
use crate::models::chart::fallback_title;
use crate::models::palette::{color_for_index, fill_for_index};
use crate::models::series::{parse_series_payload, AlignedDataset, AlignedSeries, UpstreamSeries};
use crate::models::time::DateLabel;

/// Merge every series onto the sorted union of their dates.
///
/// Series keep their input order, which also fixes their color and legend
/// position. Dates a series lacks become `None` gaps. This never fails:
/// malformed input only produces gaps.
pub fn align_series(series: &[UpstreamSeries], locale: Locale) -> AlignedDataset {
    let labels = collect_labels(series);

    let aligned = series
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let lookup = value_lookup(s);
            let values = labels
                .iter()
                .map(|label| lookup.get(label.as_str()).copied())
                .collect();
            AlignedSeries {
                title: display_title(s, index, locale),
                values,
                color: color_for_index(index).to_string(),
                fill_color: fill_for_index(index),
            }
        })
        .collect();

    AlignedDataset {
        labels,
        series: aligned,
    }
}

/// Align a raw upstream JSON payload. Non-array payloads yield an empty dataset.
pub fn align_payload(payload: &Value, locale: Locale) -> AlignedDataset {
    align_series(&parse_series_payload(payload), locale)
}

fn collect_labels(series: &[UpstreamSeries]) -> Vec<String> {
    let dates: HashSet<&str> = series
        .iter()
        .flat_map(|s| s.points.iter())
        .filter_map(|p| p.date.as_deref())
        .collect();

    let mut labels: Vec<DateLabel<'_>> = dates.into_iter().map(DateLabel::new).collect();
    labels.sort();
    labels.into_iter().map(|l| l.raw.to_string()).collect()
}

// Later points overwrite earlier ones for the same date.
fn value_lookup(series: &UpstreamSeries) -> HashMap<&str, f64> {
    series
        .points
        .iter()
        .filter_map(|p| p.date.as_deref().map(|date| (date, p.view_count)))
        .collect()
}

fn display_title(series: &UpstreamSeries, index: usize, locale: Locale) -> String {
    match series.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => fallback_title(index + 1, locale),
    }
}
