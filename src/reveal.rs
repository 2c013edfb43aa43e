//! Scroll-driven visuals: one-shot reveal and header parallax.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser layer owns the intersection observer and the scroll listener.
//! This module owns the decisions: which targets reveal (once, never again)
//! and how scroll bursts collapse into a single transform per frame.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::rc::Rc;

use crate::scheduler::{FrameThrottle, Scheduler};

// =============================================================
// One-shot reveal
// =============================================================

/// An element animated in the first time it enters the viewport.
pub trait RevealTarget {
    /// Put the element in its hidden pre-reveal state.
    fn prime(&self);
    /// Apply the revealed state.
    fn reveal(&self);
}

struct Tracked {
    target: Box<dyn RevealTarget>,
    revealed: bool,
}

/// Registry of reveal targets, indexed in registration order.
#[derive(Default)]
pub struct RevealTracker {
    targets: Vec<Tracked>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target and return its index. `prime` applies the hidden state first.
    pub fn register(&mut self, target: Box<dyn RevealTarget>, prime: bool) -> usize {
        if prime {
            target.prime();
        }
        self.targets.push(Tracked { target, revealed: false });
        self.targets.len() - 1
    }

    /// Handle an intersection change for `index`.
    ///
    /// Returns `true` exactly once per target: on its first entry into view.
    /// The caller stops observing the target at that point.
    pub fn on_intersection(&mut self, index: usize, is_intersecting: bool) -> bool {
        let Some(tracked) = self.targets.get_mut(index) else {
            log::warn!("intersection reported for unknown reveal target {index}");
            return false;
        };
        if !is_intersecting || tracked.revealed {
            return false;
        }
        tracked.revealed = true;
        tracked.target.reveal();
        true
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.targets.get(index).is_some_and(|t| t.revealed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

// =============================================================
// Parallax
// =============================================================

pub trait ScrollSource {
    /// Vertical scroll distance of the page, in pixels.
    fn scroll_y(&self) -> f64;
}

pub trait TransformTarget {
    fn set_transform(&self, css: &str);
}

#[must_use]
pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y * factor
}

#[must_use]
pub fn translate_y(offset_px: f64) -> String {
    format!("translateY({offset_px}px)")
}

/// Moves a header by a fraction of the scroll distance, at most once per frame.
pub struct ParallaxEffect {
    source: Rc<dyn ScrollSource>,
    header: Rc<dyn TransformTarget>,
    factor: f64,
    throttle: FrameThrottle,
}

impl ParallaxEffect {
    pub fn new(
        source: Rc<dyn ScrollSource>,
        header: Rc<dyn TransformTarget>,
        factor: f64,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self { source, header, factor, throttle: FrameThrottle::new(scheduler) }
    }

    /// Scroll event entry point. Reads the scroll position when the frame runs,
    /// not when the event fired.
    pub fn on_scroll(&self) -> bool {
        let source = Rc::clone(&self.source);
        let header = Rc::clone(&self.header);
        let factor = self.factor;
        self.throttle.request(Box::new(move || {
            let offset = parallax_offset(source.scroll_y(), factor);
            header.set_transform(&translate_y(offset));
        }))
    }
}
