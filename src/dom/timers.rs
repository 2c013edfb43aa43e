//! Browser scheduler: `setTimeout` through gloo-timers and
//! `requestAnimationFrame` through web-sys.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::scheduler::{Scheduler, Task, TimerId};

use super::describe;

/// Live timeouts are owned here; dropping a [`Timeout`] clears it, which is
/// how cancellation works.
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: Cell<u64>,
    timers: Rc<RefCell<HashMap<TimerId, Timeout>>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let timers = Rc::clone(&self.timers);
        let timeout = Timeout::new(delay_ms, move || {
            // The running callback belongs to this entry; hand it to JS
            // instead of dropping it mid-call.
            let fired = timers.borrow_mut().remove(&id);
            if let Some(fired) = fired {
                fired.forget();
            }
            task();
        });
        self.timers.borrow_mut().insert(id, timeout);
        id
    }

    fn cancel(&self, id: TimerId) {
        let removed = self.timers.borrow_mut().remove(&id);
        drop(removed);
    }

    fn request_frame(&self, task: Task) {
        let slot: Rc<RefCell<Option<Task>>> = Rc::new(RefCell::new(Some(task)));
        let Some(window) = web_sys::window() else {
            run_slot(&slot);
            return;
        };

        let slot_for_cb = Rc::clone(&slot);
        let cb = Closure::once_into_js(move |_ts: f64| run_slot(&slot_for_cb));
        if let Err(e) = window.request_animation_frame(cb.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed, running inline: {}", describe(&e));
            run_slot(&slot);
        }
    }
}

fn run_slot(slot: &RefCell<Option<Task>>) {
    let task = slot.borrow_mut().take();
    if let Some(task) = task {
        task();
    }
}
