use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, check_status};

const SERVICE: &str = "yelp";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YelpBusiness {
    pub name: String,
    pub rating: Option<f64>,
    pub price: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YelpClient {
    #[must_use]
    pub const fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Business search around a coordinate pair. Yelp wants the key as a
    /// bearer token rather than a query parameter.
    pub async fn search(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<YelpBusiness>, UpstreamError> {
        let url = format!(
            "{}/businesses/search?latitude={}&longitude={}",
            self.base_url, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        Ok(payload.businesses)
    }
}
