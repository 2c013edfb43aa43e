//! Newsletter signup: validation, button state machine, subscription call.
//!
//! ```text
//! Idle ──valid submit──▶ Loading ──Ok──▶ Success ──success_hold_ms──▶ Idle
//!                           └──Err──▶ Idle (error notification)
//! ```
//!
//! The subscription is an async [`Subscriber`]. [`SimulatedSubscriber`] waits a
//! fixed latency and succeeds; a real service can replace it without touching
//! the button contract. A submit while a cycle is in flight is refused.

#[cfg(test)]
#[path = "newsletter_test.rs"]
mod newsletter_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::LazyLock;

use futures::future::LocalBoxFuture;
use regex::Regex;

use crate::config::NewsletterConfig;
use crate::error::{SubmitError, SubscribeError};
use crate::notify::{NotificationKind, NotificationManager};
use crate::scheduler::{Scheduler, sleep};

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| match Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
    Ok(re) => Some(re),
    Err(e) => {
        log::error!("email pattern failed to compile: {e}");
        None
    }
});

/// Permissive shape check: `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|re| re.is_match(email))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success,
}

/// The form's submit button.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
    fn set_success(&self, success: bool);
}

/// The form's email input.
pub trait EmailField {
    fn value(&self) -> String;
    fn clear(&self);
}

pub trait Subscriber {
    fn subscribe(&self, email: String) -> LocalBoxFuture<'static, Result<(), SubscribeError>>;
}

/// Stand-in for a newsletter service: succeeds after a fixed latency.
pub struct SimulatedSubscriber {
    scheduler: Rc<dyn Scheduler>,
    latency_ms: u32,
}

impl SimulatedSubscriber {
    pub fn new(scheduler: Rc<dyn Scheduler>, latency_ms: u32) -> Self {
        Self { scheduler, latency_ms }
    }
}

impl Subscriber for SimulatedSubscriber {
    fn subscribe(&self, email: String) -> LocalBoxFuture<'static, Result<(), SubscribeError>> {
        let delay = sleep(self.scheduler.as_ref(), self.latency_ms);
        Box::pin(async move {
            delay.await;
            log::debug!("simulated subscription accepted for {email}");
            Ok(())
        })
    }
}

pub struct NewsletterFlow {
    button: Box<dyn SubmitControl>,
    field: Box<dyn EmailField>,
    subscriber: Rc<dyn Subscriber>,
    notifier: Rc<NotificationManager>,
    scheduler: Rc<dyn Scheduler>,
    config: NewsletterConfig,
    state: Cell<SubmissionState>,
    original_label: RefCell<Option<String>>,
}

impl NewsletterFlow {
    pub fn new(
        button: Box<dyn SubmitControl>,
        field: Box<dyn EmailField>,
        subscriber: Rc<dyn Subscriber>,
        notifier: Rc<NotificationManager>,
        scheduler: Rc<dyn Scheduler>,
        config: NewsletterConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            button,
            field,
            subscriber,
            notifier,
            scheduler,
            config,
            state: Cell::new(SubmissionState::Idle),
            original_label: RefCell::new(None),
        })
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    /// Handle a form submission.
    ///
    /// Invalid input notifies and returns an error without touching the
    /// button. Otherwise the button enters loading and the returned future
    /// drives the rest of the cycle; the caller spawns it.
    pub fn submit(self: &Rc<Self>) -> Result<LocalBoxFuture<'static, ()>, SubmitError> {
        if self.state.get() != SubmissionState::Idle {
            log::debug!("newsletter submit ignored while {:?}", self.state.get());
            return Err(SubmitError::InProgress);
        }

        let email = self.field.value().trim().to_owned();
        if !is_valid_email(&email) {
            self.notifier.notify(&self.config.invalid_message, NotificationKind::Error);
            return Err(SubmitError::InvalidEmail(email));
        }

        self.begin_loading();
        let pending = self.subscriber.subscribe(email);
        let flow = Rc::clone(self);
        Ok(Box::pin(async move {
            match pending.await {
                Ok(()) => {
                    flow.show_success();
                    sleep(flow.scheduler.as_ref(), flow.config.success_hold_ms).await;
                    flow.restore();
                }
                Err(e) => {
                    log::warn!("newsletter subscription failed: {e}");
                    flow.notifier.notify(&e.to_string(), NotificationKind::Error);
                    flow.restore();
                }
            }
        }))
    }

    fn begin_loading(&self) {
        *self.original_label.borrow_mut() = Some(self.button.label());
        self.button.set_label(&self.config.loading_label);
        self.button.set_disabled(true);
        self.state.set(SubmissionState::Loading);
    }

    fn show_success(&self) {
        self.button.set_label(&self.config.success_label);
        self.button.set_success(true);
        self.field.clear();
        self.state.set(SubmissionState::Success);
        self.notifier.notify(&self.config.success_message, NotificationKind::Success);
    }

    fn restore(&self) {
        if let Some(label) = self.original_label.borrow_mut().take() {
            self.button.set_label(&label);
        }
        self.button.set_disabled(false);
        self.button.set_success(false);
        self.state.set(SubmissionState::Idle);
    }
}
