use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::entities::{locations, prelude::*};
use crate::models::location::Location;

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: locations::Model) -> Location {
        Location {
            id: model.id,
            search_query: model.search_query,
            formatted_query: model.formatted_query,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }

    /// Inserts a freshly geocoded location and returns its assigned id.
    pub async fn insert(&self, location: &Location) -> Result<i32> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        let result = Locations::insert(active_model).exec(&self.conn).await?;
        info!(
            query = %location.search_query,
            id = result.last_insert_id,
            "stored new location"
        );
        Ok(result.last_insert_id)
    }

    /// Point lookup by the original query text, the natural key.
    pub async fn find_by_query(&self, query: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(query))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }
}
