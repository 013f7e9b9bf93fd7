use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::parse_timestamp;
use crate::entities::{meetup_events, prelude::*};
use crate::models::event::Event;

pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: meetup_events::Model) -> Event {
        Event {
            link: model.link,
            name: model.name,
            creation_date: model.creation_date,
            host: model.host,
            created_at: parse_timestamp(&model.created_at),
            location_id: model.location_id,
        }
    }

    pub async fn insert_many(&self, location_id: i32, rows: &[Event]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let models = rows.iter().map(|e| meetup_events::ActiveModel {
            link: Set(e.link.clone()),
            name: Set(e.name.clone()),
            creation_date: Set(e.creation_date.clone()),
            host: Set(e.host.clone()),
            created_at: Set(e.created_at.to_rfc3339()),
            location_id: Set(location_id),
            ..Default::default()
        });

        MeetupEvents::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn find_by_location(&self, location_id: i32) -> Result<Vec<Event>> {
        let rows = MeetupEvents::find()
            .filter(meetup_events::Column::LocationId.eq(location_id))
            .order_by_asc(meetup_events::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn delete_for_location(&self, location_id: i32) -> Result<()> {
        MeetupEvents::delete_many()
            .filter(meetup_events::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
