use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse};
use crate::models::location::Location;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    /// Free-text place name, e.g. `?data=Seattle`
    pub data: String,
}

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<Location>>, ApiError> {
    let place = query.data.trim();
    if place.is_empty() {
        return Err(ApiError::validation("data parameter must not be empty"));
    }

    let location = state.locations.resolve(place).await?;
    Ok(Json(ApiResponse::success(location)))
}
