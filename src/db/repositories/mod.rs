pub mod business;
pub mod event;
pub mod forecast;
pub mod location;
pub mod movie;

use chrono::{DateTime, Utc};

/// Timestamps are stored as RFC3339 strings. Anything unparseable reads back
/// as the minimum instant, which the freshness gate treats as stale.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
