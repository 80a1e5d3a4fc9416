//! Controller: owns application state and wires user actions to the store,
//! the weather client and the view renderer.
//!
//! Lookups go `Idle -> Loading -> Idle`, with the settled outcome kept in
//! [`AppState::last_outcome`]. The controller takes `&mut self` for every
//! action, so one fetch chain always settles before the next starts.

use tracing::{debug, info, warn};

use crate::{
    error::{StorageError, WeatherError},
    model::{City, SortOrder, Theme, WeatherPayload},
    provider::WeatherApi,
    storage::{KeyValueStore, Storage},
    view::{self, FavoriteAction, FavoritesView, ForecastCard, WeatherCard},
};

/// The UI the controller paints into, one method per screen region.
pub trait Surface {
    fn set_loading(&mut self, loading: bool);
    fn set_submit_enabled(&mut self, enabled: bool);
    /// `None` hides the banner.
    fn show_error(&mut self, message: Option<&str>);
    /// `None` clears the panel.
    fn paint_weather(&mut self, card: Option<&WeatherCard>);
    /// An empty slice clears the strip.
    fn paint_forecast(&mut self, cards: &[ForecastCard]);
    fn paint_favorites(&mut self, view: &FavoritesView);
    fn apply_theme(&mut self, theme: Theme);
    fn set_input(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed(WeatherError),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub input: String,
    pub phase: Phase,
    pub submit_enabled: bool,
    pub error: Option<String>,
    pub theme: Theme,
    pub sort: SortOrder,
    pub filter: String,
    /// Payload behind the weather card currently shown.
    pub current: Option<WeatherPayload>,
    pub last_outcome: Option<Outcome>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            phase: Phase::Idle,
            submit_enabled: true,
            error: None,
            theme: Theme::Light,
            sort: SortOrder::Ascending,
            filter: String::new(),
            current: None,
            last_outcome: None,
        }
    }
}

#[derive(Debug)]
pub struct App<S, C, U> {
    storage: Storage<S>,
    client: C,
    surface: U,
    state: AppState,
}

impl<S, C, U> App<S, C, U>
where
    S: KeyValueStore,
    C: WeatherApi,
    U: Surface,
{
    pub fn new(store: S, client: C, surface: U) -> Self {
        let storage = Storage::new(store);
        let state = AppState {
            theme: storage.theme(),
            ..AppState::default()
        };

        Self {
            storage,
            client,
            surface,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    /// Startup: apply the stored theme, reload the last city, paint favorites once.
    pub async fn bootstrap(&mut self) {
        let theme = self.storage.theme();
        self.set_theme(theme);

        if let Some(last) = self.storage.last_city() {
            info!(city = %last, "restoring last searched city");
            self.state.input = last.clone();
            self.surface.set_input(&last);

            match City::parse(&last) {
                Ok(city) => {
                    let _ = self.get_weather(&city).await;
                }
                Err(err) => {
                    warn!(city = %last, "stored last city is not a valid name, skipping lookup");
                    self.show_error(Some(err.user_message()));
                }
            }
        }

        self.render_favorites();
    }

    /// Search form submission.
    pub async fn submit(&mut self, raw: &str) -> Result<(), WeatherError> {
        self.state.input = raw.to_string();

        // Recorded for every submission, valid or not.
        if let Err(err) = self.storage.set_last_city(raw.trim()) {
            warn!(error = %err, "failed to persist last city");
        }

        let city = match City::parse(raw) {
            Ok(city) => city,
            Err(err) => {
                debug!(input = raw, "rejected city input");
                self.show_error(Some(err.user_message()));
                return Err(err);
            }
        };

        self.state.submit_enabled = false;
        self.surface.set_submit_enabled(false);

        let result = self.get_weather(&city).await;

        self.state.submit_enabled = true;
        self.surface.set_submit_enabled(true);

        result
    }

    /// Fetch current weather then forecast, painting each as it arrives.
    pub async fn get_weather(&mut self, city: &City) -> Result<(), WeatherError> {
        info!(city = %city, "looking up weather");
        self.state.phase = Phase::Loading;
        self.surface.set_loading(true);
        self.show_error(None);

        let result = self.load(city).await;

        match &result {
            Ok(()) => {
                self.state.last_outcome = Some(Outcome::Success);
            }
            Err(err) => {
                info!(city = %city, error = %err, "weather lookup failed");
                self.state.current = None;
                self.surface.paint_weather(None);
                self.surface.paint_forecast(&[]);
                self.show_error(Some(err.user_message()));
                self.state.last_outcome = Some(Outcome::Failed(err.clone()));
            }
        }

        self.surface.set_loading(false);
        self.state.phase = Phase::Idle;

        result
    }

    async fn load(&mut self, city: &City) -> Result<(), WeatherError> {
        let weather = self.client.fetch_current(city).await?;
        self.state.current = Some(weather);
        self.repaint_weather();

        let forecast = self.client.fetch_forecast(city).await?;
        self.surface.paint_forecast(&view::forecast_cards(&forecast));

        Ok(())
    }

    /// Star control on the weather card. Returns the new membership, or `None`
    /// when no card is shown.
    pub fn toggle_favorite(&mut self) -> Result<Option<bool>, StorageError> {
        let Some(name) = self.state.current.as_ref().map(|w| w.name.clone()) else {
            return Ok(None);
        };

        if self.storage.is_favorite(&name) {
            self.remove_favorite(&name)?;
            Ok(Some(false))
        } else {
            self.save_favorite(&name)?;
            Ok(Some(true))
        }
    }

    /// Returns whether the city was added.
    pub fn save_favorite(&mut self, city: &str) -> Result<bool, StorageError> {
        let added = self.storage.save_favorite(city)?;
        if added {
            info!(city, "saved favorite");
            self.render_favorites();
            self.repaint_weather();
        }
        Ok(added)
    }

    /// Returns whether anything was removed.
    pub fn remove_favorite(&mut self, city: &str) -> Result<bool, StorageError> {
        let removed = self.storage.remove_favorite(city)?;
        info!(city, removed, "removed favorite");
        self.render_favorites();
        self.repaint_weather();
        Ok(removed)
    }

    /// Load a favorite into the search input and resubmit.
    pub async fn select_favorite(&mut self, city: &str) -> Result<(), WeatherError> {
        self.surface.set_input(city);
        self.submit(city).await
    }

    /// Route a favorites-row click. Removal never triggers a lookup.
    pub async fn dispatch(&mut self, action: FavoriteAction) -> anyhow::Result<()> {
        match action {
            FavoriteAction::Select(city) => self.select_favorite(&city).await?,
            FavoriteAction::Remove(city) => {
                self.remove_favorite(&city)?;
            }
        }
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.state.sort = sort;
        self.render_favorites();
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.state.filter = filter.to_string();
        self.render_favorites();
    }

    pub fn favorites_view(&self) -> FavoritesView {
        view::favorites_view(&self.storage.favorites(), self.state.sort, &self.state.filter)
    }

    pub fn render_favorites(&mut self) {
        let view = self.favorites_view();
        self.surface.paint_favorites(&view);
    }

    pub fn toggle_dark(&mut self) -> Theme {
        let next = self.state.theme.toggled_dark();
        self.set_theme(next);
        next
    }

    pub fn toggle_colorful(&mut self) -> Theme {
        let next = self.state.theme.toggled_colorful();
        self.set_theme(next);
        next
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        if let Err(err) = self.storage.set_theme(theme) {
            warn!(error = %err, "failed to persist theme");
        }
        self.surface.apply_theme(theme);
    }

    fn repaint_weather(&mut self) {
        let card = self
            .state
            .current
            .as_ref()
            .map(|w| view::weather_card(w, self.storage.is_favorite(&w.name)));
        self.surface.paint_weather(card.as_ref());
    }

    fn show_error(&mut self, message: Option<String>) {
        self.surface.show_error(message.as_deref());
        self.state.error = message;
    }
}
