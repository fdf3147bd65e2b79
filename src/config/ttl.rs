//! TTL expression parsing.
//!
//! Two forms are accepted:
//! - relative-time expressions: `"+5 minutes"`, `"+2 hours"`, `"+1 day"`
//! - compact suffix forms: `"5m"`, `"2h"`, `"45s"`, `"7d"`, or bare seconds
//!
//! Expressions are parsed once at configuration time; render-path APIs take
//! the structured [`Duration`] only.

use chrono::Duration;

use crate::error::{Result, VerandaError};

/// Parse a TTL expression into a duration.
pub fn parse_ttl(value: &str) -> Result<Duration> {
    let trimmed = value.trim().to_lowercase();

    if let Some(relative) = trimmed.strip_prefix('+') {
        return parse_relative(relative).ok_or_else(|| VerandaError::InvalidTtl {
            value: value.to_string(),
        });
    }

    parse_compact(&trimmed).ok_or_else(|| VerandaError::InvalidTtl {
        value: value.to_string(),
    })
}

/// Parse the `"5 minutes"` part of a relative-time expression.
fn parse_relative(input: &str) -> Option<Duration> {
    let mut parts = input.split_whitespace();
    let amount: i64 = parts.next()?.parse().ok()?;
    let unit = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    match unit {
        "second" | "seconds" => Some(Duration::seconds(amount)),
        "minute" | "minutes" => Some(Duration::minutes(amount)),
        "hour" | "hours" => Some(Duration::hours(amount)),
        "day" | "days" => Some(Duration::days(amount)),
        "week" | "weeks" => Some(Duration::weeks(amount)),
        _ => None,
    }
}

/// Parse a compact suffix form like "7d", "24h", "30m", "45s", or bare seconds.
fn parse_compact(input: &str) -> Option<Duration> {
    if let Some(days) = input.strip_suffix('d') {
        let n: i64 = days.parse().ok()?;
        Some(Duration::days(n))
    } else if let Some(hours) = input.strip_suffix('h') {
        let n: i64 = hours.parse().ok()?;
        Some(Duration::hours(n))
    } else if let Some(mins) = input.strip_suffix('m') {
        let n: i64 = mins.parse().ok()?;
        Some(Duration::minutes(n))
    } else if let Some(secs) = input.strip_suffix('s') {
        let n: i64 = secs.parse().ok()?;
        Some(Duration::seconds(n))
    } else {
        let n: i64 = input.parse().ok()?;
        Some(Duration::seconds(n))
    }
}
