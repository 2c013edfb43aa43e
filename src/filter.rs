//! Client-side text filter over blog cards.
//!
//! A card is shown when the query is empty or when its title, excerpt, or any
//! tag contains the query, case-insensitively. Input is debounced so the pass
//! runs once per quiet period, not per keystroke.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::rc::Rc;

use crate::scheduler::{Debouncer, Scheduler};

/// Searchable text of one card, lower-cased on construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardEntry {
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl CardEntry {
    pub fn new(title: &str, excerpt: &str, tags: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            title: title.to_lowercase(),
            excerpt: excerpt.to_lowercase(),
            tags: tags.into_iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    /// `lowered_query` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, lowered_query: &str) -> bool {
        self.title.contains(lowered_query)
            || self.excerpt.contains(lowered_query)
            || self.tags.iter().any(|tag| tag.contains(lowered_query))
    }
}

/// A card element together with its layout wrapper.
pub trait CardView {
    /// Read the card's current text. Recomputed on every pass.
    fn entry(&self) -> CardEntry;
    /// Show or hide the card and its wrapper.
    fn set_visible(&self, visible: bool);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub hidden: usize,
}

/// Apply `query` to every card immediately.
pub fn apply_filter(cards: &[Box<dyn CardView>], query: &str) -> FilterSummary {
    let lowered = query.to_lowercase();
    let mut summary = FilterSummary::default();
    for card in cards {
        let visible = query.is_empty() || card.entry().matches(&lowered);
        card.set_visible(visible);
        if visible {
            summary.shown += 1;
        } else {
            summary.hidden += 1;
        }
    }
    summary
}

pub struct CardFilter {
    cards: Rc<Vec<Box<dyn CardView>>>,
    debouncer: Debouncer,
}

impl CardFilter {
    pub fn new(cards: Vec<Box<dyn CardView>>, scheduler: Rc<dyn Scheduler>, debounce_ms: u32) -> Self {
        Self { cards: Rc::new(cards), debouncer: Debouncer::new(scheduler, debounce_ms) }
    }

    /// Raw input event: (re)start the debounce window for `query`.
    pub fn on_input(&self, query: String) {
        let cards = Rc::clone(&self.cards);
        self.debouncer.call(Box::new(move || {
            let summary = apply_filter(&cards, &query);
            log::debug!("filter {query:?}: {} shown, {} hidden", summary.shown, summary.hidden);
        }));
    }

    /// Run a pass now, bypassing the debounce.
    pub fn filter(&self, query: &str) -> FilterSummary {
        apply_filter(&self.cards, query)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
