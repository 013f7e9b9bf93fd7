use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::tmdb::TmdbMovie;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub title: String,
    pub popularity: f64,
    pub released_on: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub location_id: i32,
}

impl Movie {
    /// The image URL is always the configured image base plus the poster
    /// path; when the poster path is absent the URL is the base alone. That
    /// quirk is long-standing frontend contract, so it stays.
    #[must_use]
    pub fn from_provider(
        raw: &TmdbMovie,
        image_base: &str,
        location_id: i32,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: raw.title.clone(),
            popularity: raw.popularity.unwrap_or_default(),
            released_on: raw.release_date.clone(),
            image_url: format!("{image_base}{}", raw.poster_path.as_deref().unwrap_or("")),
            created_at: fetched_at,
            location_id,
        }
    }
}
