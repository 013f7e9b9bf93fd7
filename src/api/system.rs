use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, HealthStatus};
use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthStatus>> {
    let database = state.store.ping().await.is_ok();

    Json(ApiResponse::success(HealthStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
    }))
}
