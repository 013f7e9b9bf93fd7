use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::CachedResource;
use crate::clients::UpstreamError;
use crate::clients::darksky::DarkSkyClient;
use crate::db::Store;
use crate::models::forecast::Forecast;
use crate::models::location::Location;

pub struct WeatherService {
    store: Store,
    client: Arc<DarkSkyClient>,
}

impl WeatherService {
    #[must_use]
    pub const fn new(store: Store, client: Arc<DarkSkyClient>) -> Self {
        Self { store, client }
    }
}

#[async_trait]
impl CachedResource for WeatherService {
    type Record = Forecast;

    fn kind(&self) -> &'static str {
        "weather"
    }

    async fn load(&self, location_id: i32) -> anyhow::Result<Vec<Forecast>> {
        self.store.forecasts_for_location(location_id).await
    }

    async fn evict(&self, location_id: i32) -> anyhow::Result<()> {
        self.store.delete_forecasts(location_id).await
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<Forecast>, UpstreamError> {
        let days = self
            .client
            .forecast(location.latitude, location.longitude)
            .await?;
        let fetched_at = Utc::now();
        Ok(days
            .iter()
            .map(|d| Forecast::from_provider(d, location.id, fetched_at))
            .collect())
    }

    async fn persist(&self, location_id: i32, records: &[Forecast]) -> anyhow::Result<()> {
        self.store.insert_forecasts(location_id, records).await
    }

    fn fetched_at(record: &Forecast) -> DateTime<Utc> {
        record.created_at
    }
}
