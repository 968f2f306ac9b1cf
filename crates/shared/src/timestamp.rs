//! Timestamp normalization for telemetry submissions.
//!
//! Devices may send a `ts` parameter as Unix epoch seconds or as a free-form
//! date string, or omit it entirely. All three cases normalize to a wall-clock
//! `NaiveDateTime` at second precision with no timezone marker; caller and
//! server are assumed to share a timezone convention.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Storage/display format for `recorded_at` columns.
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Free-form date formats accepted from devices, tried in order.
const FALLBACK_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Normalizes an optional caller-supplied timestamp token.
///
/// - Absent or empty: current server time.
/// - All decimal digits: interpreted as Unix epoch seconds.
/// - Otherwise: parsed as a free-form date/time string.
///
/// Unparseable or out-of-range tokens silently fall back to the current
/// server time; devices with drifting clocks keep reporting rather than
/// being rejected.
pub fn normalize(ts: Option<&str>) -> NaiveDateTime {
    let now = Utc::now().naive_utc();

    let token = match ts {
        Some(t) if !t.is_empty() => t,
        _ => return truncate_subsec(now),
    };

    if token.bytes().all(|b| b.is_ascii_digit()) {
        return match token
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
        {
            Some(dt) => dt.naive_utc(),
            None => truncate_subsec(now),
        };
    }

    parse_freeform(token).unwrap_or_else(|| truncate_subsec(now))
}

/// Renders a normalized timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_recorded_at(ts: NaiveDateTime) -> String {
    ts.format(RECORDED_AT_FORMAT).to_string()
}

fn parse_freeform(token: &str) -> Option<NaiveDateTime> {
    for fmt in FALLBACK_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.naive_utc());
    }
    // Bare date, midnight
    if let Ok(d) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

fn truncate_subsec(ts: NaiveDateTime) -> NaiveDateTime {
    use chrono::Timelike;
    ts.with_nanosecond(0).unwrap_or(ts)
}
