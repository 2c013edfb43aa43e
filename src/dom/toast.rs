//! Toast elements and their stylesheet.
//!
//! Messages are set with `textContent`, never parsed as markup.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element};

use crate::notify::{NotificationId, NotificationKind, ToastHost, ToastStage};

use super::{describe, logged, set_class};

const STYLE_ELEMENT_ID: &str = "folio-notification-styles";

const NOTIFICATION_STYLES: &str = r"
.notification {
    position: fixed;
    top: 20px;
    right: 20px;
    z-index: 10000;
    max-width: 400px;
    transform: translateX(100%);
    transition: transform 0.3s ease;
}
.notification.show { transform: translateX(0); }
.notification.hide { transform: translateX(100%); }
.notification-content {
    background: var(--card-bg);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1rem 1.5rem;
    box-shadow: 0 10px 30px rgba(0, 0, 0, 0.1);
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 1rem;
}
.notification-success .notification-content { border-left: 4px solid var(--success-color, #10b981); }
.notification-error .notification-content { border-left: 4px solid var(--error-color, #ef4444); }
.notification-message { color: var(--text-primary); font-weight: 500; }
.notification-close {
    background: none;
    border: none;
    font-size: 1.5rem;
    color: var(--text-muted);
    cursor: pointer;
    padding: 0;
    line-height: 1;
}
.notification-close:hover { color: var(--text-primary); }
.animate-on-scroll {
    opacity: 0;
    transform: translateY(30px);
    transition: opacity 0.6s ease, transform 0.6s ease;
}
.animate-on-scroll.animate-in { opacity: 1; transform: translateY(0); }
";

/// Add the toast and reveal styles to `<head>`. Safe to call repeatedly.
pub fn inject_styles(document: &Document) {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        log::debug!("no <head>; toast styles not injected");
        return;
    };
    let Some(style) = logged("create <style>", document.create_element("style")) else {
        return;
    };
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(NOTIFICATION_STYLES));
    logged("append <style>", head.append_child(&style));
}

struct Mounted {
    root: Element,
    _on_close: Closure<dyn FnMut()>,
}

/// Appends toasts to `<body>`.
pub struct DomToastHost {
    document: Document,
    mounted: RefCell<HashMap<NotificationId, Mounted>>,
}

impl DomToastHost {
    pub fn new(document: Document) -> Self {
        Self { document, mounted: RefCell::new(HashMap::new()) }
    }

    fn build(&self, message: &str, kind: NotificationKind) -> Result<(Element, Element), wasm_bindgen::JsValue> {
        let root = self.document.create_element("div")?;
        root.set_class_name(&kind.css_classes());
        root.set_attribute("role", "status")?;

        let content = self.document.create_element("div")?;
        content.set_class_name("notification-content");

        let text = self.document.create_element("span")?;
        text.set_class_name("notification-message");
        text.set_text_content(Some(message));

        let close = self.document.create_element("button")?;
        close.set_class_name("notification-close");
        close.set_attribute("type", "button")?;
        close.set_attribute("aria-label", "Dismiss")?;
        close.set_text_content(Some("\u{d7}"));

        content.append_child(&text)?;
        content.append_child(&close)?;
        root.append_child(&content)?;
        Ok((root, close))
    }
}

impl ToastHost for DomToastHost {
    fn mount(&self, id: NotificationId, message: &str, kind: NotificationKind, on_close: Box<dyn Fn()>) {
        let Some(body) = self.document.body() else {
            log::warn!("no <body>; notification {} not shown", id.0);
            return;
        };
        let (root, close) = match self.build(message, kind) {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("building notification {}: {}", id.0, describe(&e));
                return;
            }
        };

        let on_close = Closure::<dyn FnMut()>::new(move || on_close());
        logged(
            "notification close listener",
            close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref()),
        );
        if logged("append notification", body.append_child(&root)).is_none() {
            return;
        }
        self.mounted.borrow_mut().insert(id, Mounted { root, _on_close: on_close });
    }

    fn set_stage(&self, id: NotificationId, stage: ToastStage) {
        let mounted = self.mounted.borrow();
        let Some(toast) = mounted.get(&id) else {
            return;
        };
        match stage {
            ToastStage::Entering => {}
            ToastStage::Visible => set_class(&toast.root, "show", true),
            ToastStage::Hiding => set_class(&toast.root, "hide", true),
        }
    }

    fn unmount(&self, id: NotificationId) {
        let removed = self.mounted.borrow_mut().remove(&id);
        if let Some(toast) = removed {
            toast.root.remove();
        }
    }
}
