use super::*;

use std::cell::{Cell, RefCell};

use crate::scheduler::ManualScheduler;

#[derive(Default)]
struct Counts {
    primed: Cell<usize>,
    revealed: Cell<usize>,
}

struct FakeTarget(Rc<Counts>);

impl RevealTarget for FakeTarget {
    fn prime(&self) {
        self.0.primed.set(self.0.primed.get() + 1);
    }

    fn reveal(&self) {
        self.0.revealed.set(self.0.revealed.get() + 1);
    }
}

struct FakeScroll(Cell<f64>);

impl ScrollSource for FakeScroll {
    fn scroll_y(&self) -> f64 {
        self.0.get()
    }
}

#[derive(Default)]
struct FakeHeader(RefCell<Vec<String>>);

impl TransformTarget for FakeHeader {
    fn set_transform(&self, css: &str) {
        self.0.borrow_mut().push(css.to_owned());
    }
}

// =============================================================
// RevealTracker
// =============================================================

#[test]
fn register_primes_only_when_asked() {
    let card = Rc::new(Counts::default());
    let section = Rc::new(Counts::default());
    let mut tracker = RevealTracker::new();
    assert_eq!(tracker.register(Box::new(FakeTarget(card.clone())), true), 0);
    assert_eq!(tracker.register(Box::new(FakeTarget(section.clone())), false), 1);
    assert_eq!(card.primed.get(), 1);
    assert_eq!(section.primed.get(), 0);
    assert_eq!(tracker.len(), 2);
}

#[test]
fn target_reveals_at_most_once() {
    let counts = Rc::new(Counts::default());
    let mut tracker = RevealTracker::new();
    let idx = tracker.register(Box::new(FakeTarget(counts.clone())), true);

    assert!(!tracker.on_intersection(idx, false));
    assert!(!tracker.is_revealed(idx));

    assert!(tracker.on_intersection(idx, true));
    assert!(!tracker.on_intersection(idx, false));
    assert!(!tracker.on_intersection(idx, true));
    assert!(!tracker.on_intersection(idx, true));

    assert!(tracker.is_revealed(idx));
    assert_eq!(counts.revealed.get(), 1);
}

#[test]
fn unknown_index_is_ignored() {
    let mut tracker = RevealTracker::new();
    assert!(tracker.is_empty());
    assert!(!tracker.on_intersection(3, true));
    assert!(!tracker.is_revealed(3));
}

// =============================================================
// Parallax
// =============================================================

#[test]
fn parallax_offset_is_ten_percent_by_default_factor() {
    assert_eq!(parallax_offset(250.0, 0.1), 25.0);
    assert_eq!(translate_y(25.0), "translateY(25px)");
    assert_eq!(translate_y(12.5), "translateY(12.5px)");
}

#[test]
fn scroll_burst_applies_one_transform_per_frame() {
    let scheduler = Rc::new(ManualScheduler::new());
    let scroll = Rc::new(FakeScroll(Cell::new(0.0)));
    let header = Rc::new(FakeHeader::default());
    let effect = ParallaxEffect::new(scroll.clone(), header.clone(), 0.1, scheduler.clone());

    for y in [10.0, 50.0, 120.0, 250.0] {
        scroll.0.set(y);
        effect.on_scroll();
    }
    assert_eq!(scheduler.pending_frames(), 1);
    assert!(header.0.borrow().is_empty());

    scheduler.run_frame();
    assert_eq!(*header.0.borrow(), vec!["translateY(25px)".to_owned()]);

    scroll.0.set(500.0);
    assert!(effect.on_scroll());
    scheduler.run_frame();
    assert_eq!(header.0.borrow().last().map(String::as_str), Some("translateY(50px)"));
}
