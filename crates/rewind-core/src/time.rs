//! Timestamp display

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render an ISO-8601 timestamp in local time.
///
/// Absent or empty → `?`. Offset-less timestamps are taken as local time.
/// Anything unparseable is shown verbatim.
pub fn format_local(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp.filter(|t| !t.is_empty()) else {
        return "?".to_string();
    };
    to_local(raw)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn to_local(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}
