//! Light/dark theme preference and its reflection onto the document root.
//!
//! Reads the preference from the root attribute first, then durable storage,
//! then falls back to dark. [`ThemeStore::set`] is the only mutator: it writes
//! the root attribute, persists the value, and refreshes the toggle icons.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A rejected storage write is logged and the page
//! keeps showing the in-memory theme for the rest of the visit.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::icons::IconReflector;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized theme string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Durable string key-value storage (browser `localStorage`).
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The document root presentation attribute.
pub trait ThemeRoot {
    fn theme_attribute(&self) -> Option<String>;
    fn set_theme_attribute(&self, value: &str);
}

/// In-memory [`PreferenceStore`] for headless hosts and tests.
///
/// `reject_writes` simulates an exhausted quota.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    reject_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rejecting_writes() -> Self {
        Self { values: RefCell::default(), reject_writes: true }
    }

    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected(format!("quota exceeded writing {key}")));
        }
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct ThemeStore {
    storage: Rc<dyn PreferenceStore>,
    root: Rc<dyn ThemeRoot>,
    key: String,
    icons: Option<Rc<IconReflector>>,
}

impl ThemeStore {
    pub fn new(storage: Rc<dyn PreferenceStore>, root: Rc<dyn ThemeRoot>, key: impl Into<String>) -> Self {
        Self { storage, root, key: key.into(), icons: None }
    }

    /// Refresh `icons` on every theme change.
    #[must_use]
    pub fn with_icons(mut self, icons: Rc<IconReflector>) -> Self {
        self.icons = Some(icons);
        self
    }

    /// Current theme: root attribute, then stored preference, then dark.
    ///
    /// Invalid values at either layer are skipped.
    pub fn get(&self) -> Theme {
        parse_layer("root attribute", self.root.theme_attribute())
            .or_else(|| parse_layer("stored preference", self.storage.load(&self.key)))
            .unwrap_or_default()
    }

    /// Apply `theme` to the root, persist it, and refresh icons.
    pub fn set(&self, theme: Theme) {
        self.root.set_theme_attribute(theme.as_str());
        if let Err(e) = self.storage.save(&self.key, theme.as_str()) {
            log::warn!("theme preference not persisted: {e}");
        }
        if let Some(icons) = &self.icons {
            icons.reflect(theme);
        }
    }

    /// Switch to the opposite theme and return it.
    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        log::debug!("theme toggled to {next}");
        self.set(next);
        next
    }

    /// Page-load pass: make sure the root carries the effective theme and the
    /// icons match it. Does not write storage.
    pub fn init(&self) -> Theme {
        let theme = self.get();
        if self.root.theme_attribute().as_deref() != Some(theme.as_str()) {
            self.root.set_theme_attribute(theme.as_str());
        }
        if let Some(icons) = &self.icons {
            icons.reflect(theme);
        }
        theme
    }
}

fn parse_layer(layer: &str, raw: Option<String>) -> Option<Theme> {
    match raw?.parse::<Theme>() {
        Ok(theme) => Some(theme),
        Err(UnknownTheme(value)) => {
            log::debug!("ignoring unknown theme {value:?} from {layer}");
            None
        }
    }
}
