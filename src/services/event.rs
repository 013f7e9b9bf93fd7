use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::CachedResource;
use crate::clients::UpstreamError;
use crate::clients::meetup::MeetupClient;
use crate::db::Store;
use crate::models::event::Event;
use crate::models::location::Location;

pub struct EventService {
    store: Store,
    client: Arc<MeetupClient>,
}

impl EventService {
    #[must_use]
    pub const fn new(store: Store, client: Arc<MeetupClient>) -> Self {
        Self { store, client }
    }
}

#[async_trait]
impl CachedResource for EventService {
    type Record = Event;

    fn kind(&self) -> &'static str {
        "meetups"
    }

    async fn load(&self, location_id: i32) -> anyhow::Result<Vec<Event>> {
        self.store.events_for_location(location_id).await
    }

    async fn evict(&self, location_id: i32) -> anyhow::Result<()> {
        self.store.delete_events(location_id).await
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<Event>, UpstreamError> {
        let events = self
            .client
            .open_events(location.latitude, location.longitude)
            .await?;
        let fetched_at = Utc::now();
        Ok(events
            .iter()
            .map(|e| Event::from_provider(e, location.id, fetched_at))
            .collect())
    }

    async fn persist(&self, location_id: i32, records: &[Event]) -> anyhow::Result<()> {
        self.store.insert_events(location_id, records).await
    }

    fn fetched_at(record: &Event) -> DateTime<Utc> {
        record.created_at
    }
}
