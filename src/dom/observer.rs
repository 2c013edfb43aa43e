//! Intersection observer feeding the reveal tracker.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::reveal::{RevealTarget, RevealTracker};

use super::{describe, logged, query_all, set_class};

const INDEX_ATTRIBUTE: &str = "data-reveal-index";

struct ClassTarget {
    element: Element,
    pending_class: String,
    revealed_class: String,
}

impl RevealTarget for ClassTarget {
    fn prime(&self) {
        set_class(&self.element, &self.pending_class, true);
    }

    fn reveal(&self) {
        set_class(&self.element, &self.revealed_class, true);
    }
}

/// Register every reveal target on the page and start observing.
///
/// Without `IntersectionObserver` every target is revealed immediately.
pub fn observe_reveals(document: &Document, config: &RevealConfig) -> Rc<RefCell<RevealTracker>> {
    let tracker = Rc::new(RefCell::new(RevealTracker::new()));
    let mut elements = Vec::new();

    let primed = query_all(document, &config.prime_selector).into_iter().map(|el| (el, true));
    let plain = config
        .observe_selectors
        .iter()
        .flat_map(|selector| query_all(document, selector))
        .map(|el| (el, false));
    for (element, prime) in primed.chain(plain) {
        let target = ClassTarget {
            element: element.clone(),
            pending_class: config.pending_class.clone(),
            revealed_class: config.revealed_class.clone(),
        };
        let index = tracker.borrow_mut().register(Box::new(target), prime);
        logged(INDEX_ATTRIBUTE, element.set_attribute(INDEX_ATTRIBUTE, &index.to_string()));
        elements.push(element);
    }
    if elements.is_empty() {
        return tracker;
    }

    let tracker_for_cb = Rc::clone(&tracker);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = target_index(&target) else {
                    continue;
                };
                if tracker_for_cb.borrow_mut().on_intersection(index, entry.is_intersecting()) {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin());
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for element in &elements {
                observer.observe(element);
            }
            callback.forget();
            log::debug!("observing {} reveal targets", elements.len());
        }
        Err(e) => {
            log::warn!("IntersectionObserver unavailable, revealing all: {}", describe(&e));
            let mut tracker = tracker.borrow_mut();
            for index in 0..tracker.len() {
                tracker.on_intersection(index, true);
            }
        }
    }
    tracker
}

fn target_index(target: &Element) -> Option<usize> {
    let raw = target.get_attribute(INDEX_ATTRIBUTE)?;
    match raw.parse() {
        Ok(index) => Some(index),
        Err(e) => {
            log::debug!("bad {INDEX_ATTRIBUTE} {raw:?}: {e}");
            None
        }
    }
}
