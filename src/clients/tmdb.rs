use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, check_status};

const SERVICE: &str = "movies";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub title: String,
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    #[must_use]
    pub const fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Title search, results in provider relevance order.
    pub async fn search(&self, query: &str) -> Result<Vec<TmdbMovie>, UpstreamError> {
        let url = format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;

        Ok(payload.results)
    }
}
