use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

use crate::error::WeatherError;

/// A validated city name: trimmed, non-empty, ASCII letters, whitespace and hyphens only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct City(String);

impl City {
    pub fn parse(input: &str) -> Result<Self, WeatherError> {
        let trimmed = input.trim();
        if is_valid_city(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(WeatherError::InvalidCity)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for City {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        City::parse(value)
    }
}

/// Accepts the trimmed input when it is non-empty and made of ASCII letters,
/// whitespace and `-` only.
pub fn is_valid_city(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-')
}

/// Visual mode applied to the whole application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Colorful,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Colorful => "colorful",
        }
    }

    pub const fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::Colorful]
    }

    /// `dark` flips back to `light`, anything else becomes `dark`.
    pub fn toggled_dark(self) -> Theme {
        if self == Theme::Dark { Theme::Light } else { Theme::Dark }
    }

    /// `colorful` flips back to `light`, anything else becomes `colorful`.
    pub fn toggled_colorful(self) -> Theme {
        if self == Theme::Colorful { Theme::Light } else { Theme::Colorful }
    }

    /// Glyph of the dark-mode toggle while this theme is active.
    pub fn dark_toggle_glyph(self) -> &'static str {
        if self == Theme::Dark { "☀️" } else { "🌙" }
    }

    /// Glyph of the colorful-mode toggle while this theme is active.
    pub fn colorful_toggle_glyph(self) -> &'static str {
        if self == Theme::Colorful { "🌈" } else { "🎨" }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "colorful" => Ok(Theme::Colorful),
            _ => Err(anyhow::anyhow!(
                "Unknown theme '{value}'. Supported themes: light, dark, colorful."
            )),
        }
    }
}

/// Order of the favorites list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "az",
            SortOrder::Descending => "za",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "az" => Ok(SortOrder::Ascending),
            "za" => Ok(SortOrder::Descending),
            _ => Err(anyhow::anyhow!("Unknown sort order '{value}'. Use 'az' or 'za'.")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub icon: String,
    #[serde(default)]
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Current-weather response, reduced to the fields the card shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub name: String,
    pub main: MainReadings,
    pub wind: Wind,
    pub weather: Vec<Conditions>,
}

impl WeatherPayload {
    pub fn conditions(&self) -> Option<&Conditions> {
        self.weather.first()
    }
}

/// One 3-hour snapshot of the forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt_txt: String,
    pub main: MainReadings,
    pub weather: Vec<Conditions>,
}

impl ForecastEntry {
    pub fn conditions(&self) -> Option<&Conditions> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}
