use chrono::{DateTime, Local};

/// Renders an RFC 3339 timestamp in local time; anything unparseable is
/// shown as stored.
pub(crate) fn format_display_time(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => value.to_string(),
    }
}
