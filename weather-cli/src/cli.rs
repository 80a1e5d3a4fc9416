use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode, Text};
use std::{path::PathBuf, process::ExitCode};
use weather_core::{
    App, City, Config, FileStore, SortOrder, Storage, Surface, client_from_config, config, view,
};

use crate::{interactive, terminal::TerminalSurface};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup with favorites")]
pub struct Cli {
    /// Store file for favorites, theme and last city (defaults to the platform data dir).
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Menu-driven session; the default when no command is given.
    Interactive,

    /// Show current weather and forecast for a city.
    Show {
        /// City name; defaults to the last searched city.
        city: Option<String>,
    },

    /// List or edit favorite cities.
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesCommand>,

        /// Sort order of the list.
        #[arg(long, default_value = "az", value_parser = parse_sort)]
        sort: SortOrder,

        /// Only list cities containing this text (case-insensitive).
        #[arg(long)]
        filter: Option<String>,
    },

    /// Toggle a theme on or back to light.
    Theme {
        #[arg(value_enum)]
        toggle: ThemeToggle,
    },

    /// Configure the OpenWeather API key and base URL.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Save a city.
    Add { city: String },
    /// Remove a city.
    Remove { city: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeToggle {
    Dark,
    Colorful,
}

/// Favorites must be names a lookup can later accept.
fn favorite_name(raw: &str) -> Result<City> {
    City::parse(raw).with_context(|| format!("Cannot save '{}' as a favorite", raw.trim()))
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    SortOrder::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let store = self.open_store()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => {
                let client = client_from_config(&Config::load()?.with_env_overrides())?;
                let mut app = App::new(store, client, TerminalSurface::new());
                interactive::run(&mut app).await?;
            }
            Command::Show { city } => {
                let client = client_from_config(&Config::load()?.with_env_overrides())?;
                let mut app = App::new(store, client, TerminalSurface::new().without_favorites());

                let theme = app.storage().theme();
                app.surface_mut().apply_theme(theme);

                let city = match city.or_else(|| app.storage().last_city()) {
                    Some(city) => city,
                    None => {
                        eprintln!("No city given and no previous search to repeat.");
                        return Ok(ExitCode::FAILURE);
                    }
                };

                if app.submit(&city).await.is_err() {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Favorites {
                action,
                sort,
                filter,
            } => {
                let mut storage = Storage::new(store);
                let mut surface = TerminalSurface::new();
                surface.apply_theme(storage.theme());

                match action {
                    Some(FavoritesCommand::Add { city }) => {
                        let city = favorite_name(&city)?;
                        if !storage.save_favorite(city.as_str())? {
                            println!("{city} is already a favorite.");
                        }
                    }
                    Some(FavoritesCommand::Remove { city }) => {
                        if !storage.remove_favorite(city.trim())? {
                            println!("{} was not a favorite.", city.trim());
                        }
                    }
                    None => {}
                }

                let view = view::favorites_view(
                    &storage.favorites(),
                    sort,
                    filter.as_deref().unwrap_or_default(),
                );
                surface.paint_favorites(&view);
            }
            Command::Theme { toggle } => {
                let mut storage = Storage::new(store);
                let current = storage.theme();
                let next = match toggle {
                    ThemeToggle::Dark => current.toggled_dark(),
                    ThemeToggle::Colorful => current.toggled_colorful(),
                };

                storage.set_theme(next).context("Failed to save theme")?;
                TerminalSurface::new().apply_theme(next);
            }
            Command::Configure => configure()?,
        }

        Ok(ExitCode::SUCCESS)
    }

    fn open_store(&self) -> Result<FileStore> {
        match &self.store {
            Some(path) => Ok(FileStore::new(path)),
            None => FileStore::open_default().context("Failed to locate the store file"),
        }
    }
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let current_base = cfg.base_url();
    let base_url = Text::new("API base URL:")
        .with_default(&current_base)
        .prompt()?;

    cfg.set_api_key(api_key.trim().to_string());
    if base_url.trim() != config::DEFAULT_BASE_URL {
        cfg.set_base_url(base_url.trim().to_string());
    }
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
