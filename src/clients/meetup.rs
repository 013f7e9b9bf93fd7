use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, check_status};

const SERVICE: &str = "meetups";

#[derive(Debug, Deserialize)]
struct OpenEventsResponse {
    #[serde(default)]
    results: Vec<OpenEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenEvent {
    pub event_url: Option<String>,
    pub name: Option<String>,
    /// Milliseconds since the epoch.
    pub created: Option<i64>,
    pub group: Option<EventGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventGroup {
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct MeetupClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MeetupClient {
    #[must_use]
    pub const fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Upcoming open events near a coordinate pair.
    pub async fn open_events(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<OpenEvent>, UpstreamError> {
        let url = format!(
            "{}/2/open_events?lat={}&lon={}&key={}",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;

        let payload: OpenEventsResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        Ok(payload.results)
    }
}
