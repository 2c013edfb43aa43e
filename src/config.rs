//! Site configuration: DOM contracts, timings and user-facing messages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components never query the document for ambient singletons. Everything a
//! component needs to find or time is listed here and handed over at start-up,
//! so the same components run against a live document or against test doubles.
//!
//! A page may embed a partial JSON override; every section and field falls
//! back to its default when omitted.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::ConfigError;

/// Element id of the optional embedded JSON override.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub notifications: NotificationConfig,
    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub newsletter: NewsletterConfig,
    pub filter: FilterConfig,
    pub nav: NavConfig,
    pub share: ShareConfig,
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a component misbehave silently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.reveal.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal.threshold",
                reason: format!("{threshold} is not within 0.0..=1.0"),
            });
        }
        let factor = self.parallax.factor;
        if !factor.is_finite() {
            return Err(ConfigError::Invalid { field: "parallax.factor", reason: format!("{factor} is not finite") });
        }
        for (field, value) in [("nav.spy_offset_px", self.nav.spy_offset_px), ("nav.anchor_offset_px", self.nav.anchor_offset_px)] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, reason: format!("{value} is not finite") });
            }
        }
        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "theme.storage_key", reason: "must not be empty".into() });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Durable storage key holding `"light"` or `"dark"`.
    pub storage_key: String,
    /// Attribute on the document root mirrored from the stored preference.
    pub attribute: String,
    pub toggle_selector: String,
    pub sun_icon_selector: String,
    pub moon_icon_selector: String,
    /// CSS `display` value for the visible icon.
    pub icon_display: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            attribute: "data-theme".into(),
            toggle_selector: "#themeToggle".into(),
            sun_icon_selector: ".icon-light, .sun-icon, [data-lucide=\"sun\"]".into(),
            moon_icon_selector: ".icon-dark, .moon-icon, [data-lucide=\"moon\"]".into(),
            icon_display: "block".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay between insertion and the `show` class so the entry transition applies.
    pub show_delay_ms: u32,
    /// Time from creation until automatic dismissal starts.
    pub display_ms: u32,
    /// Exit transition window between `hide` and detaching the element.
    pub exit_ms: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { show_delay_ms: 100, display_ms: 5000, exit_ms: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Elements primed with `pending_class` before being observed.
    pub prime_selector: String,
    /// Additional elements observed as-is.
    pub observe_selectors: Vec<String>,
    pub threshold: f64,
    /// Bottom shrink of the intersection root, in pixels.
    pub bottom_margin_px: u32,
    pub pending_class: String,
    pub revealed_class: String,
}

impl RevealConfig {
    /// Root margin string in the form the intersection observer expects.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            prime_selector: ".blog-card".into(),
            observe_selectors: vec![".newsletter-section".into()],
            threshold: 0.1,
            bottom_margin_px: 50,
            pending_class: "animate-on-scroll".into(),
            revealed_class: "animate-in".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub header_selector: String,
    /// Fraction of the scroll distance applied as a vertical offset.
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { header_selector: ".blog-header".into(), factor: 0.1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub form_selector: String,
    pub input_selector: String,
    pub button_selector: String,
    /// Simulated subscription latency.
    pub latency_ms: u32,
    /// How long the success state is held before the button is restored.
    pub success_hold_ms: u32,
    pub loading_label: String,
    pub success_label: String,
    pub success_class: String,
    pub invalid_message: String,
    pub success_message: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            form_selector: ".newsletter-form".into(),
            input_selector: "input[type=\"email\"]".into(),
            button_selector: "button[type=\"submit\"]".into(),
            latency_ms: 1500,
            success_hold_ms: 3000,
            loading_label: "Subscribing...".into(),
            success_label: "Subscribed!".into(),
            success_class: "btn-success".into(),
            invalid_message: "Please enter a valid email address".into(),
            success_message: "Successfully subscribed! Thank you for joining.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub search_selector: String,
    pub card_selector: String,
    pub title_selector: String,
    pub excerpt_selector: String,
    pub tag_selector: String,
    pub debounce_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            search_selector: ".blog-search".into(),
            card_selector: ".blog-card".into(),
            title_selector: ".blog-card-title a".into(),
            excerpt_selector: ".blog-card-excerpt".into(),
            tag_selector: ".tag".into(),
            debounce_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub link_selector: String,
    pub section_selector: String,
    pub anchor_selector: String,
    /// Link marked active on page load.
    pub home_href: String,
    pub active_class: String,
    /// A section counts as current this many pixels before its top edge.
    pub spy_offset_px: f64,
    /// Height of the fixed navbar subtracted from anchor scroll targets.
    pub anchor_offset_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            link_selector: ".navbar-nav .nav-link".into(),
            section_selector: "section[id]".into(),
            anchor_selector: "a[href^=\"#\"]".into(),
            home_href: "#home".into(),
            active_class: "active".into(),
            spy_offset_px: 100.0,
            anchor_offset_px: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub copy_selector: String,
    pub share_selector: String,
    pub copied_message: String,
    pub copy_failed_message: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            copy_selector: ".copy-link".into(),
            share_selector: ".share-post".into(),
            copied_message: "Link copied to clipboard!".into(),
            copy_failed_message: "Could not copy the link".into(),
        }
    }
}
