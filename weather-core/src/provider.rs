use crate::{Config, error::WeatherError, provider::accuweather::AccuWeatherProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod accuweather;

/// Upstream source of current, historical and forecast data.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions body, returned as received.
    async fn current_conditions(
        &self,
        location_key: &str,
        city: Option<&str>,
    ) -> Result<Value, WeatherError>;

    /// Raw hourly entries for the last 24 hours; `None` when upstream sends `null`.
    async fn historical_24h(&self, location_key: &str) -> Result<Option<Vec<Value>>, WeatherError>;

    /// Raw 5-day daily forecast body.
    async fn daily_forecast(&self, location_key: &str) -> Result<Value, WeatherError>;
}

/// Construct the AccuWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let provider = AccuWeatherProvider::builder(api_key.to_owned())
        .base_url(config.accuweather.base_url.clone())
        .timeout(config.request_timeout())
        .retry(config.http.retry.clone())
        .build()?;

    Ok(Box::new(provider))
}
