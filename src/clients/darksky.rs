use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, check_status};

const SERVICE: &str = "weather";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    /// Unix seconds for the start of the day.
    pub time: i64,
    pub summary: Option<String>,
}

#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DarkSkyClient {
    #[must_use]
    pub const fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Fetches the daily forecast for a coordinate pair, in provider order.
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastDay>, UpstreamError> {
        let url = format!(
            "{}/{}/{},{}",
            self.base_url, self.api_key, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;

        let payload: ForecastResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        Ok(payload.daily.map(|d| d.data).unwrap_or_default())
    }
}
