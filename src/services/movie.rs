use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::CachedResource;
use crate::clients::UpstreamError;
use crate::clients::tmdb::TmdbClient;
use crate::db::Store;
use crate::models::location::Location;
use crate::models::movie::Movie;

pub struct MovieService {
    store: Store,
    client: Arc<TmdbClient>,
    image_base: String,
}

impl MovieService {
    #[must_use]
    pub const fn new(store: Store, client: Arc<TmdbClient>, image_base: String) -> Self {
        Self {
            store,
            client,
            image_base,
        }
    }
}

#[async_trait]
impl CachedResource for MovieService {
    type Record = Movie;

    fn kind(&self) -> &'static str {
        "movies"
    }

    async fn load(&self, location_id: i32) -> anyhow::Result<Vec<Movie>> {
        self.store.movies_for_location(location_id).await
    }

    async fn evict(&self, location_id: i32) -> anyhow::Result<()> {
        self.store.delete_movies(location_id).await
    }

    /// Movies are searched by the location's query text, not coordinates.
    async fn fetch(&self, location: &Location) -> Result<Vec<Movie>, UpstreamError> {
        let movies = self.client.search(&location.search_query).await?;
        let fetched_at = Utc::now();
        Ok(movies
            .iter()
            .map(|m| Movie::from_provider(m, &self.image_base, location.id, fetched_at))
            .collect())
    }

    async fn persist(&self, location_id: i32, records: &[Movie]) -> anyhow::Result<()> {
        self.store.insert_movies(location_id, records).await
    }

    fn fetched_at(record: &Movie) -> DateTime<Utc> {
        record.created_at
    }
}
