//! Error types shared across the core crate.

use thiserror::Error;

/// Errors surfaced by a weather lookup.
///
/// Fetch failures are deliberately coarse: a 404 for an unknown city and
/// an unreachable host both end up as the same variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("Please enter a valid city name.")]
    InvalidCity,

    #[error("City not found")]
    CityNotFound,

    #[error("Forecast not found")]
    ForecastNotFound,
}

impl WeatherError {
    /// Message shown in the error banner.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Errors from the persisted key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine platform data directory")]
    NoDataDir,
}
