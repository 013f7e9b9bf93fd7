use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::business::Business;
use crate::models::event::Event;
use crate::models::forecast::Forecast;
use crate::models::location::Location;
use crate::models::movie::Movie;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn forecast_repo(&self) -> repositories::forecast::ForecastRepository {
        repositories::forecast::ForecastRepository::new(self.conn.clone())
    }

    fn business_repo(&self) -> repositories::business::BusinessRepository {
        repositories::business::BusinessRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn event_repo(&self) -> repositories::event::EventRepository {
        repositories::event::EventRepository::new(self.conn.clone())
    }

    pub async fn insert_location(&self, location: &Location) -> Result<i32> {
        self.location_repo().insert(location).await
    }

    pub async fn find_location_by_query(&self, query: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_query(query).await
    }

    pub async fn insert_forecasts(&self, location_id: i32, rows: &[Forecast]) -> Result<()> {
        self.forecast_repo().insert_many(location_id, rows).await
    }

    pub async fn forecasts_for_location(&self, location_id: i32) -> Result<Vec<Forecast>> {
        self.forecast_repo().find_by_location(location_id).await
    }

    pub async fn delete_forecasts(&self, location_id: i32) -> Result<()> {
        self.forecast_repo().delete_for_location(location_id).await
    }

    pub async fn insert_businesses(&self, location_id: i32, rows: &[Business]) -> Result<()> {
        self.business_repo().insert_many(location_id, rows).await
    }

    pub async fn businesses_for_location(&self, location_id: i32) -> Result<Vec<Business>> {
        self.business_repo().find_by_location(location_id).await
    }

    pub async fn delete_businesses(&self, location_id: i32) -> Result<()> {
        self.business_repo().delete_for_location(location_id).await
    }

    pub async fn insert_movies(&self, location_id: i32, rows: &[Movie]) -> Result<()> {
        self.movie_repo().insert_many(location_id, rows).await
    }

    pub async fn movies_for_location(&self, location_id: i32) -> Result<Vec<Movie>> {
        self.movie_repo().find_by_location(location_id).await
    }

    pub async fn delete_movies(&self, location_id: i32) -> Result<()> {
        self.movie_repo().delete_for_location(location_id).await
    }

    pub async fn insert_events(&self, location_id: i32, rows: &[Event]) -> Result<()> {
        self.event_repo().insert_many(location_id, rows).await
    }

    pub async fn events_for_location(&self, location_id: i32) -> Result<Vec<Event>> {
        self.event_repo().find_by_location(location_id).await
    }

    pub async fn delete_events(&self, location_id: i32) -> Result<()> {
        self.event_repo().delete_for_location(location_id).await
    }
}
