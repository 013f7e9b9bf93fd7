use chrono::{DateTime, Utc};
use serde::Serialize;

use super::human_date;
use crate::clients::darksky::ForecastDay;

/// One day of forecast for a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub forecast: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub location_id: i32,
}

impl Forecast {
    /// `fetched_at` is passed in rather than sampled here so that mapping the
    /// same raw item twice yields structurally equal records.
    #[must_use]
    pub fn from_provider(day: &ForecastDay, location_id: i32, fetched_at: DateTime<Utc>) -> Self {
        Self {
            forecast: day.summary.clone().unwrap_or_default(),
            time: human_date(day.time),
            created_at: fetched_at,
            location_id,
        }
    }
}
