use chrono::{DateTime, FixedOffset};

/// Shown for a day whose IN has no matching OUT yet.
pub const OPEN_SESSION: &str = "In progress...";

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Elapsed hours between IN and OUT.
///
/// Returns `None` when either endpoint is missing. The result is not
/// clamped: an OUT recorded before its IN yields a negative value.
pub fn calculate_duration_hours(
    in_ts: Option<&DateTime<FixedOffset>>,
    out_ts: Option<&DateTime<FixedOffset>>,
) -> Option<f64> {
    match (in_ts, out_ts) {
        (Some(i), Some(o)) => Some((*o - *i).num_milliseconds() as f64 / MILLIS_PER_HOUR),
        _ => None,
    }
}

/// "<H>h <M>m", or [`OPEN_SESSION`] when there is no duration.
pub fn format_duration(hours: Option<f64>) -> String {
    match hours {
        None => OPEN_SESSION.to_string(),
        Some(h) => {
            let whole = h.floor();
            let minutes = ((h - whole) * 60.0).floor();
            format!("{}h {}m", whole as i64, minutes as i64)
        }
    }
}

/// Decimal hours with two digits, as used in reports ("8.50h").
pub fn format_hours_decimal(hours: f64) -> String {
    format!("{:.2}h", hours)
}
