//! `localStorage` preference store and the `<html>` theme attribute.

use web_sys::Storage;

use crate::error::StorageError;
use crate::theme::{PreferenceStore, ThemeRoot};

use super::{describe, document, logged};

fn local_storage() -> Option<Storage> {
    let window = web_sys::window()?;
    match window.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            log::debug!("localStorage blocked: {}", describe(&e));
            None
        }
    }
}

pub struct LocalStorage;

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        let storage = local_storage()?;
        logged("localStorage.getItem", storage.get_item(key)).flatten()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StorageError::WriteRejected(describe(&e)))
    }
}

/// Theme attribute on `document.documentElement`.
pub struct DocumentRoot {
    attribute: String,
}

impl DocumentRoot {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self { attribute: attribute.into() }
    }
}

impl ThemeRoot for DocumentRoot {
    fn theme_attribute(&self) -> Option<String> {
        document()?.document_element()?.get_attribute(&self.attribute)
    }

    fn set_theme_attribute(&self, value: &str) {
        let Some(root) = document().and_then(|d| d.document_element()) else {
            return;
        };
        logged(&self.attribute, root.set_attribute(&self.attribute, value));
    }
}
