use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse};
use crate::models::location::Location;
use crate::models::movie::Movie;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    /// Owning location id (the cache key).
    pub id: i32,
    /// Title search text; conventionally the location's query text.
    pub data: String,
}

pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MovieQuery>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    if query.data.trim().is_empty() {
        return Err(ApiError::validation("data parameter must not be empty"));
    }

    let location = Location {
        id: query.id,
        search_query: query.data.trim().to_string(),
        formatted_query: String::new(),
        latitude: 0.0,
        longitude: 0.0,
    };

    let lookup = state.gate.resolve(&state.movies, &location).await?;
    Ok(Json(ApiResponse::success(lookup.into_records())))
}
