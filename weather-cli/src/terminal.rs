//! Terminal implementation of the controller's [`Surface`].

use crossterm::style::{Color, Stylize};
use weather_core::{
    Surface, Theme,
    view::{self, FavoritesView, ForecastCard, WeatherCard},
};

#[derive(Debug, Clone, Copy)]
struct Palette {
    accent: Color,
    text: Color,
    muted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                accent: Color::Blue,
                text: Color::Reset,
                muted: Color::DarkGrey,
            },
            Theme::Dark => Palette {
                accent: Color::Yellow,
                text: Color::White,
                muted: Color::Grey,
            },
            Theme::Colorful => Palette {
                accent: Color::Magenta,
                text: Color::Cyan,
                muted: Color::Green,
            },
        }
    }
}

/// Prints each repainted region to stdout; loading and errors go to stderr.
#[derive(Debug)]
pub struct TerminalSurface {
    theme: Theme,
    palette: Palette,
    show_favorites: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            theme: Theme::Light,
            palette: Palette::for_theme(Theme::Light),
            show_favorites: true,
        }
    }

    /// Keep favorites repaints out of one-shot lookups.
    pub fn without_favorites(mut self) -> Self {
        self.show_favorites = false;
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn heading(&self, title: &str) {
        println!("{}", title.with(self.palette.accent).bold());
    }

    fn body(&self, text: &str) {
        print!("{}", text.with(self.palette.text));
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            eprintln!("{}", "Loading...".with(self.palette.muted).italic());
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        tracing::trace!(enabled, "search submit toggled");
    }

    fn show_error(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("{}", message.with(Color::Red).bold());
        }
    }

    fn paint_weather(&mut self, card: Option<&WeatherCard>) {
        if card.is_some() {
            println!();
            self.heading("Current weather");
            self.body(&view::render_weather(card));
        }
    }

    fn paint_forecast(&mut self, cards: &[ForecastCard]) {
        if !cards.is_empty() {
            println!();
            self.heading("5-day forecast");
            self.body(&view::render_forecast(cards));
        }
    }

    fn paint_favorites(&mut self, view: &FavoritesView) {
        if self.show_favorites {
            println!();
            self.heading("Favorites");
            let text = view::render_favorites(view);
            if view.is_empty() {
                print!("{}", text.with(self.palette.muted));
            } else {
                self.body(&text);
            }
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.palette = Palette::for_theme(theme);
        println!(
            "{} {} {}",
            format!("Theme: {theme}").with(self.palette.muted),
            theme.dark_toggle_glyph(),
            theme.colorful_toggle_glyph()
        );
    }

    fn set_input(&mut self, text: &str) {
        tracing::debug!(input = text, "search input updated");
    }
}
