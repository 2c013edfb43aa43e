use super::*;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_for_task = Rc::clone(&log);
    let make = move |label: &'static str| -> Task {
        let log = Rc::clone(&log_for_task);
        Box::new(move || log.borrow_mut().push(label))
    };
    (log, make)
}

// =============================================================
// ManualScheduler
// =============================================================

#[test]
fn advance_fires_due_timers_in_due_order() {
    let scheduler = ManualScheduler::new();
    let (log, task) = recorder();
    scheduler.schedule(300, task("late"));
    scheduler.schedule(100, task("early"));

    scheduler.advance(99);
    assert!(log.borrow().is_empty());

    scheduler.advance(1);
    assert_eq!(*log.borrow(), vec!["early"]);

    scheduler.advance(500);
    assert_eq!(*log.borrow(), vec!["early", "late"]);
    assert_eq!(scheduler.now_ms(), 600);
}

#[test]
fn equal_delays_run_in_scheduling_order() {
    let scheduler = ManualScheduler::new();
    let (log, task) = recorder();
    scheduler.schedule(50, task("a"));
    scheduler.schedule(50, task("b"));
    scheduler.schedule(50, task("c"));
    scheduler.advance(50);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn timers_scheduled_by_tasks_run_within_same_advance() {
    let scheduler = Rc::new(ManualScheduler::new());
    let fired_at = Rc::new(Cell::new(0));
    let inner_scheduler = Rc::clone(&scheduler);
    let inner_fired_at = Rc::clone(&fired_at);
    scheduler.schedule(
        100,
        Box::new(move || {
            let clock = Rc::clone(&inner_scheduler);
            inner_scheduler.schedule(200, Box::new(move || inner_fired_at.set(clock.now_ms())));
        }),
    );
    scheduler.advance(1000);
    assert_eq!(fired_at.get(), 300);
    assert_eq!(scheduler.pending_timers(), 0);
}

#[test]
fn cancelled_timer_never_fires() {
    let scheduler = ManualScheduler::new();
    let (log, task) = recorder();
    let id = scheduler.schedule(10, task("cancelled"));
    scheduler.schedule(10, task("kept"));
    scheduler.cancel(id);
    scheduler.cancel(TimerId(999));
    scheduler.advance(10);
    assert_eq!(*log.borrow(), vec!["kept"]);
}

#[test]
fn run_frame_defers_frames_requested_during_frame() {
    let scheduler = Rc::new(ManualScheduler::new());
    let inner = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move || inner.request_frame(Box::new(|| {}))));
    assert_eq!(scheduler.run_frame(), 1);
    assert_eq!(scheduler.pending_frames(), 1);
    assert_eq!(scheduler.run_frame(), 1);
    assert_eq!(scheduler.pending_frames(), 0);
}

#[test]
fn sleep_resolves_only_after_delay() {
    let scheduler = Rc::new(ManualScheduler::new());
    let mut pool = LocalPool::new();
    let done = Rc::new(Cell::new(false));
    let done_in_task = Rc::clone(&done);
    let fut = sleep(scheduler.as_ref(), 1500);
    pool.spawner()
        .spawn_local(async move {
            fut.await;
            done_in_task.set(true);
        })
        .expect("spawn");

    pool.run_until_stalled();
    assert!(!done.get());
    scheduler.advance(1499);
    pool.run_until_stalled();
    assert!(!done.get());
    scheduler.advance(1);
    pool.run_until_stalled();
    assert!(done.get());
}

// =============================================================
// Debouncer
// =============================================================

#[test]
fn debouncer_runs_only_last_call_after_quiet_period() {
    let scheduler = Rc::new(ManualScheduler::new());
    let debouncer = Debouncer::new(scheduler.clone(), 300);
    let (log, task) = recorder();

    debouncer.call(task("r"));
    scheduler.advance(100);
    debouncer.call(task("re"));
    scheduler.advance(100);
    debouncer.call(task("rea"));
    assert!(debouncer.is_pending());

    scheduler.advance(299);
    assert!(log.borrow().is_empty());
    scheduler.advance(1);
    assert_eq!(*log.borrow(), vec!["rea"]);
    assert!(!debouncer.is_pending());
    assert_eq!(scheduler.pending_timers(), 0);
}

// =============================================================
// FrameThrottle
// =============================================================

#[test]
fn frame_throttle_coalesces_bursts() {
    let scheduler = Rc::new(ManualScheduler::new());
    let throttle = FrameThrottle::new(scheduler.clone());
    let (log, task) = recorder();

    assert!(throttle.request(task("first")));
    assert!(!throttle.request(task("second")));
    assert!(!throttle.request(task("third")));
    assert!(throttle.is_pending());
    assert_eq!(scheduler.pending_frames(), 1);

    scheduler.run_frame();
    assert_eq!(*log.borrow(), vec!["first"]);
    assert!(!throttle.is_pending());

    assert!(throttle.request(task("next")));
    scheduler.run_frame();
    assert_eq!(*log.borrow(), vec!["first", "next"]);
}
