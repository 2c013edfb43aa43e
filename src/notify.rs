//! Transient toast notifications.
//!
//! Each notification is independent: it owns its element (through the
//! [`ToastHost`]) and its timers. Lifecycle, with default timings:
//!
//! ```text
//! notify ──100ms──▶ Visible ──(5000ms from creation | close click)──▶ Hiding ──300ms──▶ detached
//! ```
//!
//! Removal is idempotent. The automatic timer may fire after a manual dismissal
//! already detached the element; that late call does nothing. There is no cap
//! and no queue: concurrent toasts stack via fixed positioning.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::config::NotificationConfig;
use crate::scheduler::Scheduler;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Lenient parse for values coming from JS; unknown kinds map to info.
    #[must_use]
    pub fn from_name(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// Class list for the toast root element.
    #[must_use]
    pub fn css_classes(self) -> String {
        format!("notification notification-{}", self.as_str())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

/// Visual stage of an attached toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastStage {
    /// Inserted, entry transition not started.
    Entering,
    /// `show` applied.
    Visible,
    /// `hide` applied, waiting for the exit transition to finish.
    Hiding,
}

/// Where toast elements live. The browser host builds real DOM nodes.
pub trait ToastHost {
    /// Insert a new toast element. `on_close` is wired to its close button.
    fn mount(&self, id: NotificationId, message: &str, kind: NotificationKind, on_close: Box<dyn Fn()>);

    /// Reflect a stage change on the element (`show` / `hide` classes).
    fn set_stage(&self, id: NotificationId, stage: ToastStage);

    /// Detach the element from the document.
    fn unmount(&self, id: NotificationId);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationRecord {
    pub message: String,
    pub kind: NotificationKind,
    pub stage: ToastStage,
}

pub struct NotificationManager {
    host: Rc<dyn ToastHost>,
    scheduler: Rc<dyn Scheduler>,
    timings: NotificationConfig,
    records: RefCell<HashMap<NotificationId, NotificationRecord>>,
    next_id: Cell<u64>,
}

impl NotificationManager {
    pub fn new(host: Rc<dyn ToastHost>, scheduler: Rc<dyn Scheduler>, timings: NotificationConfig) -> Rc<Self> {
        Rc::new(Self { host, scheduler, timings, records: RefCell::default(), next_id: Cell::new(1) })
    }

    /// Show `message` and schedule its entry and automatic removal.
    pub fn notify(self: &Rc<Self>, message: &str, kind: NotificationKind) -> NotificationHandle {
        let id = NotificationId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.records.borrow_mut().insert(
            id,
            NotificationRecord { message: message.to_owned(), kind, stage: ToastStage::Entering },
        );

        let on_close = {
            let weak = Rc::downgrade(self);
            Box::new(move || {
                if let Some(manager) = weak.upgrade() {
                    manager.dismiss(id);
                }
            })
        };
        self.host.mount(id, message, kind, on_close);
        log::debug!("notification {} mounted ({kind})", id.0);

        let weak = Rc::downgrade(self);
        self.scheduler.schedule(
            self.timings.show_delay_ms,
            Box::new(move || {
                if let Some(manager) = weak.upgrade() {
                    manager.show(id);
                }
            }),
        );

        let weak = Rc::downgrade(self);
        self.scheduler.schedule(
            self.timings.display_ms,
            Box::new(move || {
                if let Some(manager) = weak.upgrade() {
                    manager.dismiss(id);
                }
            }),
        );

        NotificationHandle { id, manager: Rc::downgrade(self) }
    }

    /// Start the two-phase removal of `id`.
    ///
    /// Returns `false` when the toast is already hiding or gone.
    pub fn dismiss(self: &Rc<Self>, id: NotificationId) -> bool {
        {
            let mut records = self.records.borrow_mut();
            let Some(record) = records.get_mut(&id) else {
                return false;
            };
            if record.stage == ToastStage::Hiding {
                return false;
            }
            record.stage = ToastStage::Hiding;
        }
        self.host.set_stage(id, ToastStage::Hiding);

        let weak = Rc::downgrade(self);
        self.scheduler.schedule(
            self.timings.exit_ms,
            Box::new(move || {
                if let Some(manager) = weak.upgrade() {
                    manager.detach(id);
                }
            }),
        );
        true
    }

    #[must_use]
    pub fn record(&self, id: NotificationId) -> Option<NotificationRecord> {
        self.records.borrow().get(&id).cloned()
    }

    /// Toasts currently attached, in any stage.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.records.borrow().len()
    }

    fn show(&self, id: NotificationId) {
        {
            let mut records = self.records.borrow_mut();
            let Some(record) = records.get_mut(&id) else {
                return;
            };
            if record.stage != ToastStage::Entering {
                return;
            }
            record.stage = ToastStage::Visible;
        }
        self.host.set_stage(id, ToastStage::Visible);
    }

    fn detach(&self, id: NotificationId) {
        let removed = self.records.borrow_mut().remove(&id);
        if removed.is_some() {
            self.host.unmount(id);
            log::debug!("notification {} detached", id.0);
        }
    }
}

/// Caller-side handle to one notification.
#[derive(Clone)]
pub struct NotificationHandle {
    id: NotificationId,
    manager: Weak<NotificationManager>,
}

impl NotificationHandle {
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Same as clicking the close button.
    pub fn dismiss(&self) -> bool {
        self.manager.upgrade().is_some_and(|manager| manager.dismiss(self.id))
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.manager.upgrade().is_some_and(|manager| manager.record(self.id).is_some())
    }
}

impl fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHandle").field("id", &self.id).finish_non_exhaustive()
    }
}
