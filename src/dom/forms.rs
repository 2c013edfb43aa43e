//! Newsletter form controls.

use web_sys::{HtmlButtonElement, HtmlInputElement};

use crate::newsletter::{EmailField, SubmitControl};

use super::set_class;

pub struct ButtonControl {
    button: HtmlButtonElement,
    success_class: String,
}

impl ButtonControl {
    pub fn new(button: HtmlButtonElement, success_class: impl Into<String>) -> Self {
        Self { button, success_class: success_class.into() }
    }
}

impl SubmitControl for ButtonControl {
    fn label(&self) -> String {
        self.button.text_content().unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        self.button.set_text_content(Some(label));
    }

    fn set_disabled(&self, disabled: bool) {
        self.button.set_disabled(disabled);
    }

    fn set_success(&self, success: bool) {
        set_class(&self.button, &self.success_class, success);
    }
}

pub struct InputField(pub HtmlInputElement);

impl EmailField for InputField {
    fn value(&self) -> String {
        self.0.value()
    }

    fn clear(&self) {
        self.0.set_value("");
    }
}
