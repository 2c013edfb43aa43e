//! Sun/moon icons inside the theme toggle, and the Lucide icon pass.
//!
//! Lucide swaps `<i data-lucide>` placeholders for `<svg>` elements, so the
//! icons are looked up again on every change rather than held.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::config::ThemeConfig;
use crate::icons::{IconPair, IconRenderer, ThemeIcon};

use super::{describe, query_in, set_style};

pub struct ToggleIcons {
    toggle: Element,
    sun_selector: String,
    moon_selector: String,
    display: String,
}

impl ToggleIcons {
    /// `None` unless the toggle holds both icons.
    pub fn find(toggle: Element, config: &ThemeConfig) -> Option<Self> {
        query_in(&toggle, &config.sun_icon_selector)?;
        query_in(&toggle, &config.moon_icon_selector)?;
        Some(Self {
            toggle,
            sun_selector: config.sun_icon_selector.clone(),
            moon_selector: config.moon_icon_selector.clone(),
            display: config.icon_display.clone(),
        })
    }
}

impl IconPair for ToggleIcons {
    fn set_visible(&self, icon: ThemeIcon, visible: bool) {
        let selector = match icon {
            ThemeIcon::Sun => &self.sun_selector,
            ThemeIcon::Moon => &self.moon_selector,
        };
        let Some(element) = query_in(&self.toggle, selector) else {
            log::debug!("{icon:?} icon missing from theme toggle");
            return;
        };
        set_style(&element, "display", if visible { &self.display } else { "none" });
    }
}

/// Calls `lucide.createIcons()` when the page loaded Lucide.
pub struct LucideRenderer;

impl IconRenderer for LucideRenderer {
    fn render_icons(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(lucide) = property(&window, "lucide") else {
            return;
        };
        let Some(create) = property(&lucide, "createIcons") else {
            return;
        };
        let Some(create) = create.dyn_ref::<js_sys::Function>() else {
            return;
        };
        if let Err(e) = create.call0(&lucide) {
            log::warn!("lucide.createIcons failed: {}", describe(&e));
        }
    }
}

/// Own property of a JS object, absent when undefined or null.
pub fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    match js_sys::Reflect::get(target, &JsValue::from_str(name)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => Some(value),
        Ok(_) => None,
        Err(e) => {
            log::debug!("reading {name}: {}", describe(&e));
            None
        }
    }
}
