//! Window scrolling: position, passive listener, smooth scroll, nav sections.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::nav::{NavLink, SectionBounds, SectionSource, anchor_scroll_top};
use crate::reveal::{ScrollSource, TransformTarget};

use super::{describe, listen, logged, query, query_all, set_class, set_style};

pub struct WindowScroll;

impl ScrollSource for WindowScroll {
    fn scroll_y(&self) -> f64 {
        web_sys::window().and_then(|w| logged("scrollY", w.scroll_y())).unwrap_or(0.0)
    }
}

pub struct StyleTransform(pub Element);

impl TransformTarget for StyleTransform {
    fn set_transform(&self, css: &str) {
        set_style(&self.0, "transform", css);
    }
}

/// Calls `handler` on every window scroll, registered as passive.
pub fn on_scroll(window: &Window, mut handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(move || handler());
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    match window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(()) => closure.forget(),
        Err(e) => log::warn!("could not listen for scroll: {}", describe(&e)),
    }
}

pub fn smooth_scroll_to(top: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Route in-page anchor clicks through a smooth scroll that clears the navbar.
pub fn smooth_anchors(document: &Document, selector: &str, navbar_offset: f64) -> usize {
    let anchors = query_all(document, selector);
    for anchor in &anchors {
        let link = anchor.clone();
        let document = document.clone();
        listen(anchor, "click", move |event| {
            event.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            // A bare "#" is not a valid selector.
            if href.len() < 2 {
                return;
            }
            let Some(target) = query(&document, &href) else {
                log::debug!("anchor target {href} not found");
                return;
            };
            let top = f64::from(target.unchecked_ref::<HtmlElement>().offset_top());
            smooth_scroll_to(anchor_scroll_top(top, navbar_offset));
        });
    }
    anchors.len()
}

pub struct DomNavLink {
    element: Element,
    active_class: String,
}

impl DomNavLink {
    pub fn new(element: Element, active_class: impl Into<String>) -> Self {
        Self { element, active_class: active_class.into() }
    }
}

impl NavLink for DomNavLink {
    fn href(&self) -> Option<String> {
        self.element.get_attribute("href")
    }

    fn set_active(&self, active: bool) {
        set_class(&self.element, &self.active_class, active);
    }
}

/// Sections read fresh on each call; layout shifts as images load.
pub struct DomSections {
    document: Document,
    selector: String,
}

impl DomSections {
    pub fn new(document: Document, selector: impl Into<String>) -> Self {
        Self { document, selector: selector.into() }
    }
}

impl SectionSource for DomSections {
    fn sections(&self) -> Vec<SectionBounds> {
        query_all(&self.document, &self.selector)
            .into_iter()
            .filter_map(|element| {
                let html = element.dyn_ref::<HtmlElement>()?;
                Some(SectionBounds {
                    id: element.id(),
                    top: f64::from(html.offset_top()),
                    height: f64::from(element.client_height()),
                })
            })
            .collect()
    }
}
