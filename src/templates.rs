//! Tera template engine setup and custom filters.

use chrono::{DateTime, Utc};
use tera::Tera;

use crate::config::{
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_MONTH, SECONDS_PER_YEAR,
    TEMPLATE_GLOB,
};
use crate::error::AppError;
use crate::seo;

/// Initialize the Tera template engine
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::new(TEMPLATE_GLOB)?;

    tera.register_filter("timeago", timeago_filter);
    tera.register_filter("format_views", format_views_filter);
    tera.register_filter("reading_time", reading_time_filter);

    Ok(tera)
}

/// Convert a date string to a human-readable relative time (e.g., "2 hours ago")
fn timeago_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("timeago filter expects a string"))?;

    // The content API emits RFC 3339 timestamps; accept RFC 2822 as a fallback
    let parsed = DateTime::parse_from_rfc3339(date_str)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| DateTime::parse_from_rfc2822(date_str).map(|dt| dt.with_timezone(&Utc)));

    match parsed {
        Ok(date) => {
            let now = Utc::now();
            let seconds = now.signed_duration_since(date).num_seconds();
            Ok(tera::Value::String(relative_time(seconds)))
        }
        Err(_) => {
            // If parsing fails, return the original string
            Ok(tera::Value::String(date_str.to_string()))
        }
    }
}

fn relative_time(seconds: i64) -> String {
    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    }

    if seconds < 0 {
        "in the future".to_string()
    } else if seconds < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if seconds < SECONDS_PER_HOUR {
        plural(seconds / SECONDS_PER_MINUTE, "minute")
    } else if seconds < SECONDS_PER_DAY {
        plural(seconds / SECONDS_PER_HOUR, "hour")
    } else if seconds < SECONDS_PER_MONTH {
        plural(seconds / SECONDS_PER_DAY, "day")
    } else if seconds < SECONDS_PER_YEAR {
        plural(seconds / SECONDS_PER_MONTH, "month")
    } else {
        plural(seconds / SECONDS_PER_YEAR, "year")
    }
}

/// Format a view count with K/M suffixes
fn format_views_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let count = value
        .as_u64()
        .ok_or_else(|| tera::Error::msg("format_views filter expects a number"))?;
    Ok(tera::Value::String(seo::format_view_count(count)))
}

/// Estimate reading time for a block of content
fn reading_time_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let content = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("reading_time filter expects a string"))?;
    Ok(tera::Value::String(seo::estimate_reading_time(content)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn relative_time_units() {
        assert_eq!(relative_time(10), "just now");
        assert_eq!(relative_time(60), "1 minute ago");
        assert_eq!(relative_time(7200), "2 hours ago");
        assert_eq!(relative_time(SECONDS_PER_DAY * 3), "3 days ago");
        assert_eq!(relative_time(SECONDS_PER_YEAR), "1 year ago");
        assert_eq!(relative_time(-5), "in the future");
    }

    #[test]
    fn timeago_passes_through_unparseable_input() {
        let out = timeago_filter(&tera::Value::String("5 min read".into()), &HashMap::new())
            .expect("filter succeeds");
        assert_eq!(out, tera::Value::String("5 min read".into()));
    }

    #[test]
    fn timeago_parses_rfc3339() {
        let recent = (Utc::now() - chrono::Duration::hours(2)).to_rfc3339();
        let out = timeago_filter(&tera::Value::String(recent), &HashMap::new())
            .expect("filter succeeds");
        assert_eq!(out, tera::Value::String("2 hours ago".into()));
    }

    #[test]
    fn format_views_applies_suffix() {
        let out = format_views_filter(&tera::Value::from(1500u64), &HashMap::new())
            .expect("filter succeeds");
        assert_eq!(out, tera::Value::String("1.5K".into()));
    }
}
