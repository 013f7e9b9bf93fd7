use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod error;
mod location;
mod meetups;
mod movies;
mod observability;
mod system;
mod types;
mod weather;
mod yelp;

pub use error::ApiError;
pub use types::*;

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/location", get(location::get_location))
        .route("/weather", get(weather::get_weather))
        .route("/yelp", get(yelp::get_businesses))
        .route("/movies", get(movies::get_movies))
        .route("/meetups", get(meetups::get_events))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
