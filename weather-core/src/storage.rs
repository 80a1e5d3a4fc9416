//! Persisted key-value store and the typed adapter on top of it.
//!
//! Values are stored as strings under fixed keys, mirroring a browser
//! `localStorage`: the favorites list is a JSON array encoded into one value
//! and rewritten whole on every change.

use directories::ProjectDirs;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{error::StorageError, model::Theme};

pub const FAVORITES_KEY: &str = "weatherFavorites";
pub const THEME_KEY: &str = "weatherTheme";
pub const LAST_CITY_KEY: &str = "lastCity";

/// Whole-value string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf, StorageError> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or(StorageError::NoDataDir)?;

        Ok(dirs.data_dir().join("store.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

/// Typed access to favorites, theme and last city.
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Favorites in insertion order. Unset, unreadable or corrupt values read as empty.
    pub fn favorites(&self) -> Vec<String> {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read favorites, using empty list");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(favorites) => favorites,
            Err(err) => {
                warn!(error = %err, "stored favorites are corrupt, using empty list");
                Vec::new()
            }
        }
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites().iter().any(|f| f == city)
    }

    /// Appends `city` if absent. Returns whether the list changed.
    pub fn save_favorite(&mut self, city: &str) -> Result<bool, StorageError> {
        let mut favorites = self.favorites();
        if favorites.iter().any(|f| f == city) {
            return Ok(false);
        }

        favorites.push(city.to_string());
        self.write_favorites(&favorites)?;
        Ok(true)
    }

    /// Drops every exact match of `city`. Returns whether the list changed.
    pub fn remove_favorite(&mut self, city: &str) -> Result<bool, StorageError> {
        let favorites = self.favorites();
        let before = favorites.len();
        let kept: Vec<String> = favorites.into_iter().filter(|f| f != city).collect();

        self.write_favorites(&kept)?;
        Ok(kept.len() != before)
    }

    fn write_favorites(&mut self, favorites: &[String]) -> Result<(), StorageError> {
        let json = serde_json::to_string(favorites)?;
        self.store.set(FAVORITES_KEY, &json)
    }

    /// Persisted theme; absent or unknown values fall back to light.
    pub fn theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::try_from(raw.as_str()).unwrap_or_else(|err| {
                warn!(error = %err, "ignoring stored theme");
                Theme::Light
            }),
            Ok(None) => Theme::Light,
            Err(err) => {
                warn!(error = %err, "failed to read theme, using light");
                Theme::Light
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn last_city(&self) -> Option<String> {
        match self.store.get(LAST_CITY_KEY) {
            Ok(value) => value.filter(|city| !city.is_empty()),
            Err(err) => {
                warn!(error = %err, "failed to read last city");
                None
            }
        }
    }

    pub fn set_last_city(&mut self, city: &str) -> Result<(), StorageError> {
        self.store.set(LAST_CITY_KEY, city)
    }
}
