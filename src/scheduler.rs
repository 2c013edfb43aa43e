//! Deferred-callback scheduling on a single cooperative thread.
//!
//! DESIGN
//! ======
//! Every wait in this crate goes through [`Scheduler`]: timers, animation
//! frames and debounce windows. The browser implementation lives in
//! `dom::timers`; [`ManualScheduler`] is a virtual clock that runs the same
//! components deterministically in tests and headless hosts.
//!
//! Ordering: tasks with equal due times run in scheduling order. Nothing is
//! guaranteed across different due times beyond due-time order.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;

/// A deferred unit of work. Runs to completion once.
pub type Task = Box<dyn FnOnce()>;

/// Opaque handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    /// Run `task` once after `delay_ms`.
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId;

    /// Cancel a timer that has not fired yet. Unknown or fired ids are ignored.
    fn cancel(&self, id: TimerId);

    /// Run `task` before the next repaint.
    fn request_frame(&self, task: Task);
}

/// Resolve after `delay_ms` on `scheduler`.
///
/// The timer is armed immediately, not on first poll.
pub fn sleep(scheduler: &dyn Scheduler, delay_ms: u32) -> impl Future<Output = ()> + 'static {
    let (tx, rx) = oneshot::channel::<()>();
    scheduler.schedule(
        delay_ms,
        Box::new(move || {
            if tx.send(()).is_err() {
                log::debug!("sleep future dropped before its timer fired");
            }
        }),
    );
    async move {
        if rx.await.is_err() {
            log::debug!("sleep timer was cancelled");
        }
    }
}

// =============================================================
// ManualScheduler
// =============================================================

/// Virtual-clock scheduler. Time only moves when [`ManualScheduler::advance`] is called.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    timers: RefCell<BTreeMap<(u64, u64), Task>>,
    frames: RefCell<Vec<Task>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on the virtual clock.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Timers scheduled and not yet fired or cancelled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Animation-frame callbacks waiting for the next frame.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Move the clock forward, firing every timer that becomes due.
    ///
    /// Timers scheduled by firing tasks also run if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get().saturating_add(ms);
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let first_due = timers.first_key_value().map(|(&(due, _), _)| due);
                match first_due {
                    Some(due) if due <= target => timers.pop_first(),
                    _ => None,
                }
            };
            let Some(((due, _), task)) = next else {
                break;
            };
            self.now_ms.set(due);
            task();
        }
        self.now_ms.set(target);
    }

    /// Run the frame callbacks queued so far. Callbacks they queue wait for the next frame.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        for task in frames {
            task();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let due = self.now_ms.get() + u64::from(delay_ms);
        self.timers.borrow_mut().insert((due, seq), task);
        TimerId(seq)
    }

    fn cancel(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|&(_, seq), _| seq != id.0);
    }

    fn request_frame(&self, task: Task) {
        self.frames.borrow_mut().push(task);
    }
}

// =============================================================
// Debouncer
// =============================================================

/// Collapses bursts of calls into one call `delay_ms` after the last.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self { scheduler, delay_ms, pending: Rc::new(Cell::new(None)) }
    }

    /// Replace any not-yet-fired task with `task`.
    pub fn call(&self, task: Task) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                pending.set(None);
                task();
            }),
        );
        self.pending.set(Some(id));
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

// =============================================================
// FrameThrottle
// =============================================================

/// Coalesces requests so at most one frame callback is pending at a time.
pub struct FrameThrottle {
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<Cell<bool>>,
}

impl FrameThrottle {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self { scheduler, pending: Rc::new(Cell::new(false)) }
    }

    /// Queue `task` for the next frame unless a frame is already pending.
    ///
    /// Returns `true` when a frame was requested.
    pub fn request(&self, task: Task) -> bool {
        if self.pending.replace(true) {
            return false;
        }
        let pending = Rc::clone(&self.pending);
        self.scheduler.request_frame(Box::new(move || {
            task();
            pending.set(false);
        }));
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
