use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::cache::FreshnessGate;
use crate::clients::darksky::DarkSkyClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::meetup::MeetupClient;
use crate::clients::tmdb::TmdbClient;
use crate::clients::yelp::YelpClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{BusinessService, EventService, LocationService, MovieService, WeatherService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across all provider clients to enable connection pooling, and it
/// bounds every upstream call with the configured timeout.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("CityPulse/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub gate: FreshnessGate,

    pub locations: LocationService,

    pub weather: WeatherService,

    pub businesses: BusinessService,

    pub movies: MovieService,

    pub events: EventService,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub async fn from_config(
        config: Config,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> anyhow::Result<Arc<Self>> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.providers.request_timeout_seconds)?;
        let providers = &config.providers;

        let geocode = Arc::new(GeocodeClient::new(
            http_client.clone(),
            providers.geocode_url.clone(),
            providers.geocode_api_key.clone(),
        ));
        let darksky = Arc::new(DarkSkyClient::new(
            http_client.clone(),
            providers.weather_url.clone(),
            providers.weather_api_key.clone(),
        ));
        let yelp = Arc::new(YelpClient::new(
            http_client.clone(),
            providers.yelp_url.clone(),
            providers.yelp_api_key.clone(),
        ));
        let tmdb = Arc::new(TmdbClient::new(
            http_client.clone(),
            providers.movie_url.clone(),
            providers.movie_api_key.clone(),
        ));
        let meetup = Arc::new(MeetupClient::new(
            http_client,
            providers.meetup_url.clone(),
            providers.meetup_api_key.clone(),
        ));

        let gate = FreshnessGate::from_minutes(config.cache.freshness_minutes);

        let locations = LocationService::new(store.clone(), geocode);
        let weather = WeatherService::new(store.clone(), darksky);
        let businesses = BusinessService::new(store.clone(), yelp);
        let movies = MovieService::new(store.clone(), tmdb, providers.movie_image_base.clone());
        let events = EventService::new(store.clone(), meetup);

        Ok(Arc::new(Self {
            config,
            store,
            gate,
            locations,
            weather,
            businesses,
            movies,
            events,
            start_time: std::time::Instant::now(),
            prometheus_handle,
        }))
    }
}
