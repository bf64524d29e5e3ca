use crate::{
    Config, FetchError, WeatherQuery, WeatherSnapshot, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A remote source of current weather.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the provider described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for OpenWeather.\n\
                 Hint: run `weatherview configure` or set WEATHERVIEW_API_KEY."
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key).with_base_url(config.base_url());

    Ok(Box::new(provider))
}
