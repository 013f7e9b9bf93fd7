use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::CachedResource;
use crate::clients::UpstreamError;
use crate::clients::yelp::YelpClient;
use crate::db::Store;
use crate::models::business::Business;
use crate::models::location::Location;

pub struct BusinessService {
    store: Store,
    client: Arc<YelpClient>,
}

impl BusinessService {
    #[must_use]
    pub const fn new(store: Store, client: Arc<YelpClient>) -> Self {
        Self { store, client }
    }
}

#[async_trait]
impl CachedResource for BusinessService {
    type Record = Business;

    fn kind(&self) -> &'static str {
        "yelp"
    }

    async fn load(&self, location_id: i32) -> anyhow::Result<Vec<Business>> {
        self.store.businesses_for_location(location_id).await
    }

    async fn evict(&self, location_id: i32) -> anyhow::Result<()> {
        self.store.delete_businesses(location_id).await
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<Business>, UpstreamError> {
        let businesses = self
            .client
            .search(location.latitude, location.longitude)
            .await?;
        let fetched_at = Utc::now();
        Ok(businesses
            .iter()
            .map(|b| Business::from_provider(b, location.id, fetched_at))
            .collect())
    }

    async fn persist(&self, location_id: i32, records: &[Business]) -> anyhow::Result<()> {
        self.store.insert_businesses(location_id, records).await
    }

    fn fetched_at(record: &Business) -> DateTime<Utc> {
        record.created_at
    }
}
