//! Persistence of projects, custom templates and the UI theme
//!
//! Collections are stored whole, as one JSON document per key. Reads never
//! fail: a missing or unreadable collection is logged and treated as empty
//! so the editor always starts.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::document_model::{Project, Template};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Key of the saved projects collection
pub const PROJECTS_KEY: &str = "manualProjects";

/// Key of the user templates collection
pub const CUSTOM_TEMPLATES_KEY: &str = "customTemplates";

/// Key of the theme preference
pub const THEME_KEY: &str = "theme";

/// Durable string storage addressed by key
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing was stored
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// UI colour scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('"') {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Typed access to the persisted collections of a store
#[derive(Debug)]
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

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load every saved project
    ///
    /// Returns an empty list when nothing is stored or the data is unreadable.
    pub fn load_projects(&self) -> Vec<Project> {
        self.load_collection(PROJECTS_KEY)
    }

    pub fn save_projects(&mut self, projects: &[Project]) -> Result<(), StorageError> {
        self.save_collection(PROJECTS_KEY, projects)?;
        log::debug!("Saved {} projects", projects.len());
        Ok(())
    }

    /// Load the template library
    ///
    /// # Parameters
    /// * `builtins` - Templates compiled into the editor
    ///
    /// # Returns
    /// The built-in templates followed by the stored custom templates. A
    /// custom template replaces a built-in template with the same id.
    pub fn load_templates(&self, builtins: Vec<Template>) -> Vec<Template> {
        let customs: Vec<Template> = self.load_collection(CUSTOM_TEMPLATES_KEY);
        let custom_ids: HashSet<&str> = customs.iter().map(|t| t.id.as_str()).collect();

        let mut templates: Vec<Template> = builtins
            .into_iter()
            .filter(|t| !custom_ids.contains(t.id.as_str()))
            .collect();
        let custom_count = customs.len();
        templates.extend(customs.iter().cloned());
        log::debug!(
            "Loaded {} templates ({} custom)",
            templates.len(),
            custom_count
        );
        templates
    }

    /// Persist the custom templates of a library
    ///
    /// Built-in templates in `templates` are skipped.
    pub fn save_custom_templates(&mut self, templates: &[Template]) -> Result<(), StorageError> {
        let customs: Vec<&Template> = templates.iter().filter(|t| t.is_custom()).collect();
        self.save_collection(CUSTOM_TEMPLATES_KEY, &customs)?;
        log::debug!("Saved {} custom templates", customs.len());
        Ok(())
    }

    /// Load the stored theme, `fallback` if none or unreadable
    pub fn load_theme(&self, fallback: Theme) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring stored theme: {}", e);
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                log::warn!("Failed to read theme: {}", e);
                fallback
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&theme).map_err(|source| StorageError::Serialize {
            key: THEME_KEY.to_string(),
            source,
        })?;
        self.store.set(THEME_KEY, &encoded)
    }

    fn load_collection<T>(&self, key: &str) -> Vec<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read '{}', starting empty: {}", key, e);
                return Vec::new();
            }
        };
        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Stored '{}' is corrupt, starting empty: {}", key, e);
                return Vec::new();
            }
        };
        values
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("Skipping unreadable entry {} of '{}': {}", i, key, e);
                    None
                }
            })
            .collect()
    }

    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &encoded)
    }
}
