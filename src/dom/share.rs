//! Clipboard and share-sheet capabilities.
//!
//! Both APIs are looked up at runtime: they are missing outside secure
//! contexts and in older browsers.

use futures::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use crate::error::ShareError;
use crate::share::{Clipboard, LegacyCopy, NativeShare, SharePayload};

use super::describe;
use super::icons::property;

fn navigator_capability(name: &str) -> Option<JsValue> {
    let navigator = web_sys::window()?.navigator();
    property(&navigator, name)
}

fn failed(capability: &'static str, error: &JsValue) -> ShareError {
    ShareError::Failed { capability, message: describe(error) }
}

/// `navigator.clipboard.writeText`.
pub struct NavigatorClipboard {
    clipboard: web_sys::Clipboard,
}

impl NavigatorClipboard {
    pub fn detect() -> Option<Self> {
        let clipboard = navigator_capability("clipboard")?;
        Some(Self { clipboard: clipboard.unchecked_into() })
    }
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ShareError>> {
        let promise = self.clipboard.write_text(text);
        Box::pin(async move {
            JsFuture::from(promise).await.map(drop).map_err(|e| failed("clipboard", &e))
        })
    }
}

/// Hidden textarea plus `document.execCommand("copy")`.
pub struct TextareaCopy;

impl LegacyCopy for TextareaCopy {
    fn copy_text(&self, text: &str) -> Result<(), ShareError> {
        let document = super::document().ok_or(ShareError::Unsupported("document"))?;
        let body = document.body().ok_or(ShareError::Unsupported("document.body"))?;
        let html = document.dyn_ref::<HtmlDocument>().ok_or(ShareError::Unsupported("execCommand"))?;

        let area: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(|e| failed("execCommand", &e))?
            .unchecked_into();
        area.set_value(text);
        area.set_attribute("readonly", "").map_err(|e| failed("execCommand", &e))?;
        super::set_style(&area, "position", "fixed");
        super::set_style(&area, "opacity", "0");
        body.append_child(&area).map_err(|e| failed("execCommand", &e))?;
        area.select();
        let copied = html.exec_command("copy");
        area.remove();

        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(ShareError::Failed { capability: "execCommand", message: "copy refused".into() }),
            Err(e) => Err(failed("execCommand", &e)),
        }
    }
}

/// `navigator.share`, called reflectively so no unstable bindings are needed.
pub struct NavigatorShare {
    navigator: web_sys::Navigator,
    share: js_sys::Function,
}

impl NavigatorShare {
    pub fn detect() -> Option<Self> {
        let navigator = web_sys::window()?.navigator();
        let share = property(&navigator, "share")?.dyn_ref::<js_sys::Function>()?.clone();
        Some(Self { navigator, share })
    }
}

impl NativeShare for NavigatorShare {
    fn share(&self, payload: &SharePayload) -> LocalBoxFuture<'static, Result<(), ShareError>> {
        let data = js_sys::Object::new();
        let mut fields = vec![("title", payload.title.as_str()), ("url", payload.url.as_str())];
        if let Some(text) = &payload.text {
            fields.push(("text", text.as_str()));
        }
        for (key, value) in fields {
            if let Err(e) = js_sys::Reflect::set(&data, &JsValue::from_str(key), &JsValue::from_str(value)) {
                let error = failed("share", &e);
                return Box::pin(async move { Err(error) });
            }
        }

        let called = self.share.call1(&self.navigator, &data);
        Box::pin(async move {
            let promise = called.map_err(|e| failed("share", &e))?;
            match JsFuture::from(js_sys::Promise::resolve(&promise)).await {
                Ok(_) => Ok(()),
                Err(e) if is_abort(&e) => Err(ShareError::Cancelled),
                Err(e) => Err(failed("share", &e)),
            }
        })
    }
}

/// The user dismissing the share sheet rejects with an `AbortError`.
fn is_abort(error: &JsValue) -> bool {
    property(error, "name").and_then(|name| name.as_string()).is_some_and(|name| name == "AbortError")
}
