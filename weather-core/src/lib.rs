//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration of the weather API (key and base URL)
//! - The persisted store for favorites, theme and last searched city
//! - The OpenWeather client behind the [`WeatherApi`] trait
//! - Pure view models for the weather card, forecast strip and favorites list
//! - The [`App`] controller that ties them together behind a [`Surface`]
//!
//! It is used by `weather-cli`, but the controller only needs a [`Surface`]
//! implementation to drive any other front end.

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod storage;
pub mod view;

pub use app::{App, AppState, Outcome, Phase, Surface};
pub use config::{ApiSettings, Config};
pub use error::{StorageError, WeatherError};
pub use model::{City, ForecastPayload, SortOrder, Theme, WeatherPayload};
pub use provider::{WeatherApi, client_from_config, openweather::OpenWeatherClient};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage};
