use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, CoordQuery};
use crate::models::event::Event;
use crate::state::AppState;

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let location = query.into_location();
    let lookup = state.gate.resolve(&state.events, &location).await?;
    Ok(Json(ApiResponse::success(lookup.into_records())))
}
