use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, CoordQuery};
use crate::models::forecast::Forecast;
use crate::state::AppState;

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<ApiResponse<Vec<Forecast>>>, ApiError> {
    let location = query.into_location();
    let lookup = state.gate.resolve(&state.weather, &location).await?;
    Ok(Json(ApiResponse::success(lookup.into_records())))
}
