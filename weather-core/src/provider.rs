use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::WeatherError,
    model::{City, ForecastPayload, WeatherPayload},
    provider::openweather::OpenWeatherClient,
};

pub mod openweather;

/// Source of current weather and forecast data for a city.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn fetch_current(&self, city: &City) -> Result<WeatherPayload, WeatherError>;

    async fn fetch_forecast(&self, city: &City) -> Result<ForecastPayload, WeatherError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let settings = config.api_settings()?;
    OpenWeatherClient::new(&settings.base_url, settings.api_key)
}
