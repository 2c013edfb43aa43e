//! Client-side interactivity for a portfolio and blog site.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! small amount of behavior the static pages need: the light/dark theme
//! preference, the icons that reflect it, scroll-triggered reveal and parallax,
//! toast notifications, the newsletter signup flow, search over blog cards,
//! scroll-spy navigation, and copy-link/share helpers.
//!
//! Every component talks to the page through narrow traits, so the logic
//! builds and tests natively. The browser implementations live in `dom` and
//! the page-load wiring in `boot`; both exist only with the `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Selectors, timings and messages ([`config::SiteConfig`]) |
//! | [`error`] | Typed errors for every fallible seam |
//! | [`scheduler`] | Timers, animation frames, debounce and frame throttling |
//! | [`theme`] | Theme preference store ([`theme::ThemeStore`]) |
//! | [`icons`] | Sun/moon icon visibility ([`icons::IconReflector`]) |
//! | [`reveal`] | One-shot reveal tracking and header parallax |
//! | [`notify`] | Toast lifecycle ([`notify::NotificationManager`]) |
//! | [`newsletter`] | Email validation and the signup cycle |
//! | [`filter`] | Debounced card search ([`filter::CardFilter`]) |
//! | [`nav`] | Scroll-spy, anchor offsets, reading time |
//! | [`share`] | Copy-link and native share with fallbacks |

pub mod config;
pub mod error;
pub mod filter;
pub mod icons;
pub mod nav;
pub mod newsletter;
pub mod notify;
pub mod reveal;
pub mod scheduler;
pub mod share;
pub mod theme;

#[cfg(feature = "hydrate")]
mod boot;
#[cfg(feature = "hydrate")]
mod dom;

#[cfg(feature = "hydrate")]
pub use boot::{copy_link, notify, scroll_to_top, share_post, start, toggle_theme};
