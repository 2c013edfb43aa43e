//! Browser implementations of the component traits.
//!
//! ERROR HANDLING
//! ==============
//! web-sys reports failures as opaque `JsValue`s. They are converted to text
//! here and either mapped into the crate's error enums or logged and dropped.
//! A missing element or capability never aborts start-up; the dependent
//! feature is skipped.

pub mod cards;
pub mod forms;
pub mod icons;
pub mod observer;
pub mod scroll;
pub mod share;
pub mod storage;
pub mod timers;
pub mod toast;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Human-readable text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

/// Unwrap a web-sys result, logging the failure under `context`.
pub fn logged<T>(context: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{context}: {}", describe(&e));
            None
        }
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    logged(selector, document.query_selector(selector)).flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    logged(selector, document.query_selector_all(selector)).map_or_else(Vec::new, |list| elements(&list))
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    logged(selector, root.query_selector(selector)).flatten()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    logged(selector, root.query_selector_all(selector)).map_or_else(Vec::new, |list| elements(&list))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

/// Text content of the first match below `root`, or empty.
pub fn text_in(root: &Element, selector: &str) -> String {
    query_in(root, selector).and_then(|el| el.text_content()).unwrap_or_default()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on { classes.add_1(class) } else { classes.remove_1(class) };
    logged(class, result);
}

/// Set an inline style property. Works on any element with a `style`
/// attribute, SVG included.
pub fn set_style(element: &Element, property: &str, value: &str) {
    let style = element.unchecked_ref::<HtmlElement>().style();
    logged(property, style.set_property(property, value));
}

/// Attach a listener for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        Ok(()) => closure.forget(),
        Err(e) => log::warn!("could not listen for {event}: {}", describe(&e)),
    }
}
