use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `{date, viewCount}` observation as sent by the upstream script.
///
/// `date` is `None` when the point carried no usable date; such points never
/// contribute a label. `view_count` has already been coerced to a number and
/// is `NaN` when the raw value was not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: Option<String>,
    pub view_count: f64,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, view_count: f64) -> Self {
        Self {
            date: Some(date.into()),
            view_count,
        }
    }

    /// Read a point from arbitrary JSON. Non-object values yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            date: obj.get("date").and_then(date_key),
            view_count: coerce_view_count(obj.get("viewCount")),
        })
    }
}

/// One named series as returned upstream: `{title?, data: [...]}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamSeries {
    pub title: Option<String>,
    pub points: Vec<SeriesPoint>,
}

impl UpstreamSeries {
    pub fn new(title: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            title: Some(title.into()),
            points,
        }
    }

    /// Read a series from arbitrary JSON without failing.
    ///
    /// Anything that is not an object becomes an untitled series without
    /// points; a missing or non-array `data` field becomes an empty list.
    pub fn from_value(value: &Value) -> Self {
        let title = value
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string);
        let points = value
            .get("data")
            .and_then(Value::as_array)
            .map(|points| points.iter().filter_map(SeriesPoint::from_value).collect())
            .unwrap_or_default();
        Self { title, points }
    }
}

/// Interpret an upstream payload as a list of series.
///
/// A payload that is not a JSON array is treated as an empty list.
pub fn parse_series_payload(payload: &Value) -> Vec<UpstreamSeries> {
    payload
        .as_array()
        .map(|items| items.iter().map(UpstreamSeries::from_value).collect())
        .unwrap_or_default()
}

/// Label for a raw `date` field.
///
/// Numbers are epoch milliseconds and are rewritten as RFC 3339 UTC text so
/// they order alongside calendar strings. Empty strings, zero and other JSON
/// types carry no date.
fn date_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let millis = n.as_f64().filter(|m| m.is_finite() && *m != 0.0)?;
            DateTime::from_timestamp_millis(millis.trunc() as i64)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        _ => None,
    }
}

/// Coerce a raw `viewCount` the way a JavaScript `Number(...)` call would.
///
/// Numbers pass through, `null` is zero, booleans are one or zero, strings are
/// parsed after trimming (empty is zero) and everything else is `NaN`.
pub fn coerce_view_count(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_string(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

fn parse_numeric_string(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = parse_radix_literal(s) {
        return value;
    }

    // Rust accepts "inf" and "nan" spellings that must stay non-numeric here.
    let decimal = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    Some(
        u128::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN),
    )
}

/// One series after alignment onto the shared label axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedSeries {
    pub title: String,
    /// One entry per label. `None` marks a gap; `Some(NaN)` marks a
    /// non-numeric upstream count. Both serialize as JSON `null`.
    pub values: Vec<Option<f64>>,
    pub color: String,
    pub fill_color: String,
}

/// Unified, gap-filled dataset ready for a line chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedDataset {
    pub labels: Vec<String>,
    pub series: Vec<AlignedSeries>,
}

impl AlignedDataset {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
