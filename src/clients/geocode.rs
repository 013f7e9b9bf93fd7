use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, check_status};

const SERVICE: &str = "geocode";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoResult {
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: GeoPoint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub const fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Resolves a free-text place query to its best geocode result.
    /// A successful response with zero results is `UpstreamError::NoResults`.
    pub async fn geocode(&self, query: &str) -> Result<GeoResult, UpstreamError> {
        let url = format!(
            "{}/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;

        let payload: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        payload
            .results
            .into_iter()
            .next()
            .ok_or(UpstreamError::NoResults { service: SERVICE })
    }
}
