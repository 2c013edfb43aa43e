//! Theme toggle icon visibility.
//!
//! The toggle carries a sun and a moon icon. The visible icon is the theme the
//! button switches *to*: dark shows the sun, light shows the moon.

#[cfg(test)]
#[path = "icons_test.rs"]
mod icons_test;

use std::rc::Rc;

use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

/// Icon shown on the toggle while `theme` is active.
#[must_use]
pub fn visible_icon(theme: Theme) -> ThemeIcon {
    match theme {
        Theme::Dark => ThemeIcon::Sun,
        Theme::Light => ThemeIcon::Moon,
    }
}

/// The two mutually exclusive icon elements inside the toggle control.
pub trait IconPair {
    fn set_visible(&self, icon: ThemeIcon, visible: bool);
}

/// Third-party icon rendering pass. Idempotent; may be absent on the page.
pub trait IconRenderer {
    fn render_icons(&self);
}

/// Renderer used when no icon library is loaded.
pub struct NoIconRenderer;

impl IconRenderer for NoIconRenderer {
    fn render_icons(&self) {}
}

pub struct IconReflector {
    pair: Option<Box<dyn IconPair>>,
    renderer: Rc<dyn IconRenderer>,
}

impl IconReflector {
    /// `pair` is `None` when the page has no toggle or the toggle lacks either icon.
    pub fn new(pair: Option<Box<dyn IconPair>>, renderer: Rc<dyn IconRenderer>) -> Self {
        Self { pair, renderer }
    }

    /// Show the icon for `theme` and hide the other, then re-run icon rendering.
    ///
    /// No-op without an icon pair.
    pub fn reflect(&self, theme: Theme) {
        let Some(pair) = &self.pair else {
            return;
        };
        let shown = visible_icon(theme);
        for icon in [ThemeIcon::Sun, ThemeIcon::Moon] {
            pair.set_visible(icon, icon == shown);
        }
        self.renderer.render_icons();
    }
}
