//! Pure mapping from API payloads to view models, and from view models to
//! terminal markup.
//!
//! Nothing here touches the store or the network; the controller decides
//! when to call these and hands the results to its [`Surface`](crate::app::Surface).

use chrono::NaiveDateTime;
use std::cmp::Ordering;

use crate::model::{ForecastPayload, SortOrder, WeatherPayload};

pub const NOON_MARKER: &str = "12:00:00";
pub const NO_FAVORITES: &str = "No favorites yet.";
const ICON_BASE: &str = "https://openweathermap.org/img/wn";

/// Current-weather card.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub city: String,
    pub is_favorite: bool,
    pub icon_url: String,
    pub icon_alt: String,
    pub temperature: i64,
    pub summary: String,
    pub humidity: Option<u8>,
    pub wind_speed: f64,
}

impl WeatherCard {
    pub fn star(&self) -> &'static str {
        if self.is_favorite { "★" } else { "☆" }
    }

    pub fn star_title(&self) -> &'static str {
        if self.is_favorite {
            "Remove from Favorites"
        } else {
            "Save to Favorites"
        }
    }
}

/// One noon snapshot in the forecast strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub weekday: String,
    pub icon_url: String,
    pub temperature: i64,
    pub description: String,
}

/// Click targets on a favorites row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteAction {
    /// Load the city into the search input and resubmit.
    Select(String),
    /// Drop the city from favorites; never also selects it.
    Remove(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRow {
    pub city: String,
}

impl FavoriteRow {
    pub fn select(&self) -> FavoriteAction {
        FavoriteAction::Select(self.city.clone())
    }

    pub fn remove(&self) -> FavoriteAction {
        FavoriteAction::Remove(self.city.clone())
    }
}

/// Sorted, filtered favorites. An empty view renders as the placeholder row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoritesView {
    pub rows: Vec<FavoriteRow>,
}

impl FavoritesView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cities(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.city.as_str()).collect()
    }
}

pub fn weather_card(payload: &WeatherPayload, is_favorite: bool) -> WeatherCard {
    let (icon, main, description) = payload
        .conditions()
        .map(|c| (c.icon.as_str(), c.main.as_str(), c.description.as_str()))
        .unwrap_or(("", "", ""));

    WeatherCard {
        city: payload.name.clone(),
        is_favorite,
        icon_url: icon_url(icon, 4),
        icon_alt: description.to_string(),
        temperature: round_half_up(payload.main.temp),
        summary: format!("{main} ({description})"),
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
    }
}

/// Noon entries only, one per day.
pub fn forecast_cards(payload: &ForecastPayload) -> Vec<ForecastCard> {
    payload
        .list
        .iter()
        .filter(|entry| entry.dt_txt.contains(NOON_MARKER))
        .map(|entry| {
            let (icon, description) = entry
                .conditions()
                .map(|c| (c.icon.as_str(), c.description.as_str()))
                .unwrap_or(("", ""));

            ForecastCard {
                weekday: weekday_abbrev(&entry.dt_txt),
                icon_url: icon_url(icon, 2),
                temperature: round_half_up(entry.main.temp),
                description: capitalize_first(description),
            }
        })
        .collect()
}

pub fn favorites_view(favorites: &[String], sort: SortOrder, filter: &str) -> FavoritesView {
    let mut cities = favorites.to_vec();
    match sort {
        SortOrder::Ascending => cities.sort_by(|a, b| locale_cmp(a, b)),
        SortOrder::Descending => cities.sort_by(|a, b| locale_cmp(b, a)),
    }

    let needle = filter.trim().to_lowercase();
    let rows = cities
        .into_iter()
        .filter(|city| needle.is_empty() || city.to_lowercase().contains(&needle))
        .map(|city| FavoriteRow { city })
        .collect();

    FavoritesView { rows }
}

/// Case-insensitive order; on a case-only tie lowercase sorts first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Rounds halves toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> i64 {
    // `f64::round` takes halves away from zero; only negative halves differ.
    let rounded = value.round();
    let rounded = if value - rounded == 0.5 { rounded + 1.0 } else { rounded };
    rounded as i64
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn weekday_abbrev(dt_txt: &str) -> String {
    NaiveDateTime::parse_from_str(dt_txt, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_else(|_| dt_txt.split_whitespace().next().unwrap_or_default().to_string())
}

fn icon_url(icon: &str, scale: u8) -> String {
    format!("{ICON_BASE}/{icon}@{scale}x.png")
}

pub fn render_weather(card: Option<&WeatherCard>) -> String {
    let Some(card) = card else {
        return String::new();
    };

    let humidity = card
        .humidity
        .map(|h| h.to_string())
        .unwrap_or_else(|| "--".to_string());

    format!(
        "{} {}  [{}]\n{}°\n{}\n💧 {humidity}% Humidity   💨 {} m/s Wind\n{}\n",
        card.city,
        card.star(),
        card.star_title(),
        card.temperature,
        card.summary,
        card.wind_speed,
        card.icon_url,
    )
}

pub fn render_forecast(cards: &[ForecastCard]) -> String {
    cards
        .iter()
        .map(|card| {
            format!(
                "{:<4} {:>4}°  {}\n",
                card.weekday, card.temperature, card.description
            )
        })
        .collect()
}

pub fn render_favorites(view: &FavoritesView) -> String {
    if view.is_empty() {
        return format!("{NO_FAVORITES}\n");
    }

    view.rows
        .iter()
        .enumerate()
        .map(|(idx, row)| format!("{:>2}. {}  ✖\n", idx + 1, row.city))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Conditions, ForecastEntry, MainReadings, Wind};

    fn conditions(icon: &str, main: &str, description: &str) -> Vec<Conditions> {
        vec![Conditions {
            icon: icon.into(),
            main: main.into(),
            description: description.into(),
        }]
    }

    fn paris() -> WeatherPayload {
        WeatherPayload {
            name: "Paris".into(),
            main: MainReadings { temp: 11.5, humidity: Some(81) },
            wind: Wind { speed: 4.1 },
            weather: conditions("10d", "Rain", "light rain"),
        }
    }

    fn five_day_forecast() -> ForecastPayload {
        let mut list = Vec::new();
        for day in 15..20 {
            for hour in (0..24).step_by(3) {
                list.push(ForecastEntry {
                    dt_txt: format!("2023-11-{day} {hour:02}:00:00"),
                    main: MainReadings { temp: f64::from(hour) + 0.5, humidity: None },
                    weather: conditions("03d", "Clouds", "scattered clouds"),
                });
            }
        }
        ForecastPayload { list }
    }

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn weather_card_maps_payload() {
        let card = weather_card(&paris(), false);

        assert_eq!(card.city, "Paris");
        assert_eq!(card.temperature, 12);
        assert_eq!(card.summary, "Rain (light rain)");
        assert_eq!(card.icon_url, "https://openweathermap.org/img/wn/10d@4x.png");
        assert_eq!(card.star(), "☆");
        assert_eq!(card.star_title(), "Save to Favorites");
    }

    #[test]
    fn weather_card_star_reflects_membership() {
        let card = weather_card(&paris(), true);
        assert_eq!(card.star(), "★");
        assert_eq!(card.star_title(), "Remove from Favorites");
    }

    #[test]
    fn absent_card_renders_empty() {
        assert_eq!(render_weather(None), "");
    }

    #[test]
    fn render_weather_shows_details() {
        let text = render_weather(Some(&weather_card(&paris(), true)));
        assert!(text.contains("Paris ★"));
        assert!(text.contains("12°"));
        assert!(text.contains("81% Humidity"));
        assert!(text.contains("4.1 m/s Wind"));
    }

    #[test]
    fn forecast_keeps_only_noon_entries() {
        let payload = five_day_forecast();
        assert_eq!(payload.list.len(), 40);

        let cards = forecast_cards(&payload);

        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| c.temperature == 13));
        assert_eq!(
            cards.iter().map(|c| c.weekday.as_str()).collect::<Vec<_>>(),
            vec!["Wed", "Thu", "Fri", "Sat", "Sun"]
        );
        assert_eq!(cards[0].description, "Scattered clouds");
        assert_eq!(cards[0].icon_url, "https://openweathermap.org/img/wn/03d@2x.png");
    }

    #[test]
    fn forecast_without_entries_is_empty() {
        assert!(forecast_cards(&ForecastPayload { list: Vec::new() }).is_empty());
        assert_eq!(render_forecast(&[]), "");
    }

    #[test]
    fn favorites_sort_ascending_and_descending() {
        let favorites = cities(&["Paris", "oslo", "Berlin"]);

        let az = favorites_view(&favorites, SortOrder::Ascending, "");
        assert_eq!(az.cities(), vec!["Berlin", "oslo", "Paris"]);

        let za = favorites_view(&favorites, SortOrder::Descending, "");
        assert_eq!(za.cities(), vec!["Paris", "oslo", "Berlin"]);
    }

    #[test]
    fn favorites_filter_is_case_insensitive_substring() {
        let favorites = cities(&["Paris", "oslo", "Berlin"]);

        let view = favorites_view(&favorites, SortOrder::Ascending, "  PAR ");
        assert_eq!(view.cities(), vec!["Paris"]);
    }

    #[test]
    fn empty_favorites_render_placeholder() {
        let view = favorites_view(&cities(&["Paris"]), SortOrder::Ascending, "xyz");
        assert!(view.is_empty());
        assert_eq!(render_favorites(&view), "No favorites yet.\n");
    }

    #[test]
    fn row_actions_are_distinct() {
        let view = favorites_view(&cities(&["Rome"]), SortOrder::Ascending, "");
        let row = &view.rows[0];

        assert_eq!(row.select(), FavoriteAction::Select("Rome".into()));
        assert_eq!(row.remove(), FavoriteAction::Remove("Rome".into()));
    }

    #[test]
    fn locale_cmp_puts_lowercase_first_on_ties() {
        assert_eq!(locale_cmp("paris", "Paris"), Ordering::Less);
        assert_eq!(locale_cmp("Berlin", "athens"), Ordering::Greater);
        assert_eq!(locale_cmp("Oslo", "Oslo"), Ordering::Equal);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(11.49), 11);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-3.7), -4);
    }

    #[test]
    fn render_forecast_and_favorites_one_line_per_item() {
        let cards = forecast_cards(&five_day_forecast());
        let text = render_forecast(&cards);
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("Wed    13°  Scattered clouds\n"));

        let view = favorites_view(&cities(&["Rome", "Lima"]), SortOrder::Ascending, "");
        assert_eq!(render_favorites(&view), " 1. Lima  ✖\n 2. Rome  ✖\n");
    }

    #[test]
    fn capitalize_first_handles_empty() {
        assert_eq!(capitalize_first("light rain"), "Light rain");
        assert_eq!(capitalize_first(""), "");
    }
}
