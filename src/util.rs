// Parsing and numeric helpers shared by the loader, the comparison engine and
// the output layer.
use num_format::{Locale, ToFormattedString};

/// Parse a spreadsheet-style cell into `f64`, forgiving the usual export noise.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed, including
///   `NaN` and infinities.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    // -0.0 would serialize as "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Percentage with two decimals, as shown in the rate columns.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages, e.g. `9,855 rows loaded`.
    n.to_formatted_string(&Locale::en)
}
