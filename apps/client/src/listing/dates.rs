//! Posting-date parsing and the relative "posted" label shown on job cards.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses the raw `posted_date` field.
///
/// Accepts RFC 3339, naive ISO date-times (read as UTC), plain `YYYY-MM-DD`
/// dates and Unix timestamps in seconds. Empty text and `"N/A"` are `None`.
pub fn parse_posted_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("n/a") {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        let secs = raw.parse::<i64>().ok()?;
        return Utc.timestamp_opt(secs, 0).single();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Human label for how long ago a listing was posted.
///
/// Distance is counted in UTC calendar days, in either direction:
/// 0 → "Today", 1 → "Yesterday", 2–6 → "N days ago", 7–29 → "N weeks ago",
/// 30+ → the absolute date rendered with `date_format`.
pub fn relative_date_label(
    posted: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    date_format: &str,
) -> String {
    let Some(posted) = posted else {
        return "Recently".to_string();
    };

    let days = (now.date_naive() - posted.date_naive()).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => posted.format(date_format).to_string(),
    }
}
