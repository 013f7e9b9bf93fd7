use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::ResolveError;
use crate::clients::geocode::GeocodeClient;
use crate::db::Store;
use crate::models::location::Location;

/// Location resolution with a permanent cache: the freshness window never
/// applies and there is no eviction path. A place name geocoded once stays
/// geocoded.
pub struct LocationService {
    store: Store,
    geocode: Arc<GeocodeClient>,
}

impl LocationService {
    #[must_use]
    pub const fn new(store: Store, geocode: Arc<GeocodeClient>) -> Self {
        Self { store, geocode }
    }

    /// Serves the stored location for `query` if one exists; otherwise
    /// geocodes, persists, and returns the row with its assigned id.
    ///
    /// Zero geocode results propagate as `UpstreamError::NoResults` without
    /// creating a row.
    pub async fn resolve(&self, query: &str) -> Result<Location, ResolveError> {
        match self.store.find_location_by_query(query).await {
            Ok(Some(existing)) => return Ok(existing),
            Ok(None) => {}
            Err(e) => {
                warn!(query, error = %e, "location lookup failed; treating as miss");
            }
        }

        let hit = self.geocode.geocode(query).await?;
        let mut location = Location::from_geocode(query, &hit);
        location.id = self
            .store
            .insert_location(&location)
            .await
            .map_err(ResolveError::Persistence)?;

        info!(query, id = location.id, "geocoded new location");
        Ok(location)
    }
}
