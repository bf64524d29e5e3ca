use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    FetchError,
    model::{WeatherQuery, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {e}");
                Client::new()
            });

        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    /// Point the provider at another host, e.g. a proxy or a test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn query_params(&self, query: &WeatherQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            WeatherQuery::ByName(name) => vec![("q", name.trim().to_string())],
            WeatherQuery::ByCoordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        };
        params.push(("appid", self.api_key.clone()));
        params
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        debug!("Requesting current weather for {query}");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| {
                warn!("OpenWeather request for {query} failed: {e}");
                FetchError::request(e)
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!("OpenWeather answered {status} for {query}");
            return Err(FetchError::transport(status));
        }

        let body = res.text().await.map_err(FetchError::request)?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse OpenWeather body for {query}: {e}");
            FetchError::request(e)
        })
    }
}
