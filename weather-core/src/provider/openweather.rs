use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{City, ForecastPayload, WeatherPayload},
};

use super::WeatherApi;

/// Client for the OpenWeather `weather` and `forecast` endpoints, metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: Url,
    http: Client,
}

impl OpenWeatherClient {
    /// `base_url` must end with `/` for the endpoint paths to append to it.
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid weather base URL: {base_url}"))?;

        Ok(Self {
            api_key,
            base_url,
            http: Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for endpoint '{path}'"))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, city: &City) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(%url, city = %city, "requesting OpenWeather {path}");

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({path})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {path} response body"))?;

        if !status.is_success() {
            anyhow::bail!(
                "OpenWeather {path} request failed with status {}: {}",
                status,
                truncate_body(&body),
            );
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse OpenWeather {path} JSON"))
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn fetch_current(&self, city: &City) -> Result<WeatherPayload, WeatherError> {
        self.get_json("weather", city).await.map_err(|err| {
            warn!(city = %city, error = %format!("{err:#}"), "current weather lookup failed");
            WeatherError::CityNotFound
        })
    }

    async fn fetch_forecast(&self, city: &City) -> Result<ForecastPayload, WeatherError> {
        self.get_json("forecast", city).await.map_err(|err| {
            warn!(city = %city, error = %format!("{err:#}"), "forecast lookup failed");
            WeatherError::ForecastNotFound
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
