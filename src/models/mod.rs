pub mod business;
pub mod event;
pub mod forecast;
pub mod location;
pub mod movie;

use chrono::{DateTime, Utc};

/// Renders unix seconds the way the frontend expects dates:
/// "Thu Jan 01 1970".
pub(crate) fn human_date(unix_seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(unix_seconds, 0)
        .map(|t| t.format("%a %b %d %Y").to_string())
        .unwrap_or_default()
}
