//! Blog cards as filterable views.

use std::rc::Rc;

use web_sys::Element;

use crate::config::FilterConfig;
use crate::filter::{CardEntry, CardView};

use super::{query_all_in, set_style, text_in};

pub struct DomCard {
    card: Element,
    selectors: Rc<FilterConfig>,
}

impl DomCard {
    pub fn new(card: Element, selectors: Rc<FilterConfig>) -> Self {
        Self { card, selectors }
    }
}

impl CardView for DomCard {
    fn entry(&self) -> CardEntry {
        let title = text_in(&self.card, &self.selectors.title_selector);
        let excerpt = text_in(&self.card, &self.selectors.excerpt_selector);
        let tags: Vec<String> = query_all_in(&self.card, &self.selectors.tag_selector)
            .iter()
            .filter_map(|tag| tag.text_content())
            .collect();
        CardEntry::new(&title, &excerpt, &tags)
    }

    /// Cards sit inside a grid column; the column is hidden with them.
    fn set_visible(&self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        set_style(&self.card, "display", display);
        if let Some(parent) = self.card.parent_element() {
            set_style(&parent, "display", display);
        }
    }
}
