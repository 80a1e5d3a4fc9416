//! Menu loop standing in for the page's search form, favorites list and
//! theme buttons.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use std::fmt;
use weather_core::{
    App, KeyValueStore, SortOrder, WeatherApi,
    view::{self, FavoriteAction},
};

use crate::terminal::TerminalSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    OpenFavorite,
    RemoveFavorite,
    ToggleStar,
    Sort,
    Filter,
    ToggleDark,
    ToggleColorful,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 9] = [
        MenuItem::Search,
        MenuItem::OpenFavorite,
        MenuItem::RemoveFavorite,
        MenuItem::ToggleStar,
        MenuItem::Sort,
        MenuItem::Filter,
        MenuItem::ToggleDark,
        MenuItem::ToggleColorful,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Search => "Search city",
            MenuItem::OpenFavorite => "Open favorite",
            MenuItem::RemoveFavorite => "Remove favorite",
            MenuItem::ToggleStar => "Star / unstar current city",
            MenuItem::Sort => "Sort favorites",
            MenuItem::Filter => "Filter favorites",
            MenuItem::ToggleDark => "Toggle dark theme",
            MenuItem::ToggleColorful => "Toggle colorful theme",
            MenuItem::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// `None` when the user cancelled the prompt (Esc / Ctrl-C).
fn cancellable<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub async fn run<S, C>(app: &mut App<S, C, TerminalSurface>) -> Result<()>
where
    S: KeyValueStore,
    C: WeatherApi,
{
    app.bootstrap().await;

    loop {
        let theme = app.surface().theme();
        let prompt = format!(
            "{} {}  What next?",
            theme.dark_toggle_glyph(),
            theme.colorful_toggle_glyph()
        );

        let Some(item) = cancellable(Select::new(&prompt, MenuItem::ALL.to_vec()).prompt())?
        else {
            break;
        };

        match item {
            MenuItem::Search => {
                let input = app.state().input.clone();
                let mut text = Text::new("City:");
                if !input.is_empty() {
                    text = text.with_default(&input);
                }
                if let Some(city) = cancellable(text.prompt())? {
                    // Failures are already on screen.
                    let _ = app.submit(&city).await;
                }
            }
            MenuItem::OpenFavorite => {
                if let Some(city) = pick_favorite(app, "Open which favorite?")? {
                    let _ = app.dispatch(FavoriteAction::Select(city)).await;
                }
            }
            MenuItem::RemoveFavorite => {
                if let Some(city) = pick_favorite(app, "Remove which favorite?")? {
                    app.dispatch(FavoriteAction::Remove(city)).await?;
                }
            }
            MenuItem::ToggleStar => {
                if app.toggle_favorite()?.is_none() {
                    println!("Search for a city first.");
                }
            }
            MenuItem::Sort => {
                let options = vec![SortOrder::Ascending, SortOrder::Descending];
                if let Some(sort) = cancellable(Select::new("Sort order:", options).prompt())? {
                    app.set_sort(sort);
                }
            }
            MenuItem::Filter => {
                let current = app.state().filter.clone();
                let prompt = Text::new("Filter (empty to clear):").with_initial_value(&current);
                if let Some(filter) = cancellable(prompt.prompt())? {
                    app.set_filter(&filter);
                }
            }
            MenuItem::ToggleDark => {
                app.toggle_dark();
            }
            MenuItem::ToggleColorful => {
                app.toggle_colorful();
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}

fn pick_favorite<S, C>(app: &App<S, C, TerminalSurface>, message: &str) -> Result<Option<String>>
where
    S: KeyValueStore,
    C: WeatherApi,
{
    let favorites = app.favorites_view();
    if favorites.is_empty() {
        println!("{}", view::NO_FAVORITES);
        return Ok(None);
    }

    let cities = favorites.rows.into_iter().map(|row| row.city).collect();
    cancellable(Select::new(message, cities).prompt())
}
