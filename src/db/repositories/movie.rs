use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::parse_timestamp;
use crate::entities::{movies, prelude::*};
use crate::models::movie::Movie;

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: movies::Model) -> Movie {
        Movie {
            title: model.title,
            popularity: model.popularity,
            released_on: model.released_on,
            image_url: model.image_url,
            created_at: parse_timestamp(&model.created_at),
            location_id: model.location_id,
        }
    }

    pub async fn insert_many(&self, location_id: i32, rows: &[Movie]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let models = rows.iter().map(|m| movies::ActiveModel {
            title: Set(m.title.clone()),
            popularity: Set(m.popularity),
            released_on: Set(m.released_on.clone()),
            image_url: Set(m.image_url.clone()),
            created_at: Set(m.created_at.to_rfc3339()),
            location_id: Set(location_id),
            ..Default::default()
        });

        Movies::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn find_by_location(&self, location_id: i32) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .filter(movies::Column::LocationId.eq(location_id))
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn delete_for_location(&self, location_id: i32) -> Result<()> {
        Movies::delete_many()
            .filter(movies::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
