use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::parse_timestamp;
use crate::entities::{businesses, prelude::*};
use crate::models::business::Business;

pub struct BusinessRepository {
    conn: DatabaseConnection,
}

impl BusinessRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: businesses::Model) -> Business {
        Business {
            name: model.name,
            rating: model.rating,
            price: model.price,
            url: model.url,
            image_url: model.image_url,
            created_at: parse_timestamp(&model.created_at),
            location_id: model.location_id,
        }
    }

    pub async fn insert_many(&self, location_id: i32, rows: &[Business]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let models = rows.iter().map(|b| businesses::ActiveModel {
            name: Set(b.name.clone()),
            rating: Set(b.rating),
            price: Set(b.price.clone()),
            url: Set(b.url.clone()),
            image_url: Set(b.image_url.clone()),
            created_at: Set(b.created_at.to_rfc3339()),
            location_id: Set(location_id),
            ..Default::default()
        });

        Businesses::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn find_by_location(&self, location_id: i32) -> Result<Vec<Business>> {
        let rows = Businesses::find()
            .filter(businesses::Column::LocationId.eq(location_id))
            .order_by_asc(businesses::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn delete_for_location(&self, location_id: i32) -> Result<()> {
        Businesses::delete_many()
            .filter(businesses::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
