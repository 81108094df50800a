use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    retry::{RetryPolicy, with_retry},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct AccuWeatherProvider {
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
    http: Client,
}

#[derive(Debug, Clone)]
pub struct AccuWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl AccuWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<AccuWeatherProvider, reqwest::Error> {
        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(AccuWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            retry: self.retry,
            http,
        })
    }
}

impl AccuWeatherProvider {
    pub fn builder(api_key: String) -> AccuWeatherProviderBuilder {
        AccuWeatherProviderBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, path);

        let mut query: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str())];
        query.extend_from_slice(extra);

        tracing::debug!(endpoint, %url, "requesting upstream");

        let res = with_retry(&self.retry, || self.http.get(&url).query(&query).send())
            .await
            .map_err(|source| WeatherError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint: endpoint.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl WeatherProvider for AccuWeatherProvider {
    async fn current_conditions(
        &self,
        location_key: &str,
        city: Option<&str>,
    ) -> Result<Value, WeatherError> {
        let path = format!("currentconditions/v1/{location_key}");
        let extra: Vec<(&str, &str)> = city.map(|c| ("city", c)).into_iter().collect();

        self.get_json("AccuWeather current conditions", &path, &extra)
            .await
    }

    async fn historical_24h(&self, location_key: &str) -> Result<Option<Vec<Value>>, WeatherError> {
        let path = format!("currentconditions/v1/{location_key}/historical/24");

        self.get_json("AccuWeather historical", &path, &[]).await
    }

    async fn daily_forecast(&self, location_key: &str) -> Result<Value, WeatherError> {
        let path = format!("forecasts/v1/daily/5day/{location_key}");

        self.get_json("AccuWeather 5-day forecast", &path, &[("details", "true")])
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
