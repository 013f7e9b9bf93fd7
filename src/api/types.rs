use serde::{Deserialize, Serialize};

use crate::models::location::Location;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// The location record echoed back by the frontend as query parameters on
/// every dependent route: `id` keys the cache, the coordinates feed the
/// upstream fetch.
#[derive(Debug, Deserialize)]
pub struct CoordQuery {
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub search_query: Option<String>,
}

impl CoordQuery {
    #[must_use]
    pub fn into_location(self) -> Location {
        Location {
            id: self.id,
            search_query: self.search_query.unwrap_or_default(),
            formatted_query: String::new(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: String,
    pub uptime_seconds: u64,
    pub database: bool,
}
