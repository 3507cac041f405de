//! Text formatting helpers for the notification centre
//!
//! Relative timestamps for panel items and the compact one-line summary
//! printed when a session ends.

use chrono::{DateTime, Utc};

/// Trait for types that can be formatted compactly
pub trait CompactFormat {
    /// Convert the type to a compact one-line format
    ///
    /// The output should be a single line holding only the essentials.
    fn to_compact_format(&self) -> String;
}

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 1440;
const MINUTES_PER_MONTH: i64 = 43_200;
const MINUTES_PER_YEAR: i64 = 525_600;

/// Distance between `timestamp` and `now` in words, with a suffix:
/// "5 minutes ago", "about 2 hours ago", "in 3 days".
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();
    let words = distance_in_words(seconds.abs());
    if seconds >= 0 {
        format!("{} ago", words)
    } else {
        format!("in {}", words)
    }
}

/// Approximate distance for a span of `seconds` (non-negative)
pub fn distance_in_words(seconds: i64) -> String {
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_PER_DAY {
        let hours = (minutes as f64 / MINUTES_PER_HOUR as f64).round() as i64;
        format!("about {}", plural(hours, "hour"))
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < MINUTES_PER_MONTH {
        let days = (minutes as f64 / MINUTES_PER_DAY as f64).round() as i64;
        plural(days, "day")
    } else if minutes < 2 * MINUTES_PER_MONTH {
        let months = (minutes as f64 / MINUTES_PER_MONTH as f64).round() as i64;
        format!("about {}", plural(months, "month"))
    } else if minutes < MINUTES_PER_YEAR {
        let months = (minutes as f64 / MINUTES_PER_MONTH as f64).round() as i64;
        plural(months, "month")
    } else {
        let months = minutes / MINUTES_PER_MONTH;
        let (years, remainder) = (months / 12, months % 12);
        if remainder < 3 {
            format!("about {}", plural(years, "year"))
        } else if remainder < 9 {
            format!("over {}", plural(years, "year"))
        } else {
            format!("almost {}", plural(years + 1, "year"))
        }
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
