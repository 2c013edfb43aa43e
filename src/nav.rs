//! Navigation helpers: scroll-spy, anchor scroll targets, reading time.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::rc::Rc;

use crate::reveal::ScrollSource;
use crate::scheduler::{FrameThrottle, Scheduler};

/// Reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Vertical extent of a page section, in document pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Id of the section the reader is in.
///
/// A section becomes current `offset` pixels before its top edge. When ranges
/// overlap the later section wins.
#[must_use]
pub fn active_section(scroll_y: f64, sections: &[SectionBounds], offset: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| {
            let start = s.top - offset;
            scroll_y >= start && scroll_y < start + s.height
        })
        .map(|s| s.id.as_str())
}

/// Scroll position that puts `target_top` just below a fixed navbar.
#[must_use]
pub fn anchor_scroll_top(target_top: f64, navbar_offset: f64) -> f64 {
    target_top - navbar_offset
}

/// Estimated minutes to read `content`. Never less than one.
#[must_use]
pub fn reading_time_minutes(content: &str) -> usize {
    let words = content.split_whitespace().count().max(1);
    words.div_ceil(WORDS_PER_MINUTE)
}

pub trait NavLink {
    fn href(&self) -> Option<String>;
    fn set_active(&self, active: bool);
}

pub trait SectionSource {
    fn sections(&self) -> Vec<SectionBounds>;
}

/// Marks the nav link of the current section as active while scrolling.
pub struct ScrollSpy {
    links: Rc<Vec<Box<dyn NavLink>>>,
    sections: Rc<dyn SectionSource>,
    scroll: Rc<dyn ScrollSource>,
    offset: f64,
    throttle: FrameThrottle,
}

impl ScrollSpy {
    pub fn new(
        links: Vec<Box<dyn NavLink>>,
        sections: Rc<dyn SectionSource>,
        scroll: Rc<dyn ScrollSource>,
        offset: f64,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self { links: Rc::new(links), sections, scroll, offset, throttle: FrameThrottle::new(scheduler) }
    }

    /// Page-load state: only the link pointing at `home_href` is active.
    pub fn activate_home(&self, home_href: &str) {
        mark_active(&self.links, Some(home_href));
    }

    pub fn on_scroll(&self) -> bool {
        let links = Rc::clone(&self.links);
        let sections = Rc::clone(&self.sections);
        let scroll = Rc::clone(&self.scroll);
        let offset = self.offset;
        self.throttle.request(Box::new(move || {
            let bounds = sections.sections();
            let current = active_section(scroll.scroll_y(), &bounds, offset).map(|id| format!("#{id}"));
            mark_active(&links, current.as_deref());
        }))
    }
}

fn mark_active(links: &[Box<dyn NavLink>], active_href: Option<&str>) {
    for link in links {
        let is_active = active_href.is_some_and(|href| link.href().as_deref() == Some(href));
        link.set_active(is_active);
    }
}
