use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::parse_timestamp;
use crate::entities::{prelude::*, weather_forecasts};
use crate::models::forecast::Forecast;

pub struct ForecastRepository {
    conn: DatabaseConnection,
}

impl ForecastRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: weather_forecasts::Model) -> Forecast {
        Forecast {
            forecast: model.forecast,
            time: model.time,
            created_at: parse_timestamp(&model.created_at),
            location_id: model.location_id,
        }
    }

    pub async fn insert_many(&self, location_id: i32, rows: &[Forecast]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let models = rows.iter().map(|f| weather_forecasts::ActiveModel {
            forecast: Set(f.forecast.clone()),
            time: Set(f.time.clone()),
            created_at: Set(f.created_at.to_rfc3339()),
            location_id: Set(location_id),
            ..Default::default()
        });

        WeatherForecasts::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    /// Rows in insertion order, which is the order the provider returned them.
    pub async fn find_by_location(&self, location_id: i32) -> Result<Vec<Forecast>> {
        let rows = WeatherForecasts::find()
            .filter(weather_forecasts::Column::LocationId.eq(location_id))
            .order_by_asc(weather_forecasts::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn delete_for_location(&self, location_id: i32) -> Result<()> {
        WeatherForecasts::delete_many()
            .filter(weather_forecasts::Column::LocationId.eq(location_id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
