//! Fixed series palette.
//!
//! Colors are assigned by series position only, so a series keeps its color
//! across reloads as long as the upstream keeps its order.

/// Line colors, indexed by `position % PALETTE.len()`.
pub const PALETTE: [&str; 9] = [
    "#ef4444", "#22c55e", "#60a5fa", "#f59e0b", "#a78bfa", "#14b8a6", "#f43f5e", "#84cc16",
    "#f472b6",
];

/// Opacity of the area under each line.
pub const FILL_ALPHA: f64 = 0.25;

pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Convert `#rgb` / `#rrggbb` to a CSS `rgba(...)` string.
///
/// Returns `None` if the input is not a 3- or 6-digit hex color.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Option<String> {
    let digits = hex.trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    let r = (value >> 16) & 255;
    let g = (value >> 8) & 255;
    let b = value & 255;
    Some(format!("rgba({r}, {g}, {b}, {alpha})"))
}

/// Translucent fill color for the series at `index`.
pub fn fill_for_index(index: usize) -> String {
    let color = color_for_index(index);
    // Palette entries are all valid six-digit colors.
    hex_to_rgba(color, FILL_ALPHA).unwrap_or_else(|| color.to_string())
}
