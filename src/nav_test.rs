use super::*;

use std::cell::Cell;

use crate::scheduler::ManualScheduler;

fn section(id: &str, top: f64, height: f64) -> SectionBounds {
    SectionBounds { id: id.to_owned(), top, height }
}

fn page() -> Vec<SectionBounds> {
    vec![section("home", 0.0, 600.0), section("about", 600.0, 400.0), section("contact", 1000.0, 500.0)]
}

struct FakeLink {
    href: Option<&'static str>,
    active: Rc<Cell<bool>>,
}

impl NavLink for FakeLink {
    fn href(&self) -> Option<String> {
        self.href.map(str::to_owned)
    }

    fn set_active(&self, active: bool) {
        self.active.set(active);
    }
}

struct FixedSections(Vec<SectionBounds>);

impl SectionSource for FixedSections {
    fn sections(&self) -> Vec<SectionBounds> {
        self.0.clone()
    }
}

struct FakeScroll(Cell<f64>);

impl ScrollSource for FakeScroll {
    fn scroll_y(&self) -> f64 {
        self.0.get()
    }
}

// =============================================================
// active_section
// =============================================================

#[test]
fn active_section_switches_one_hundred_pixels_early() {
    let sections = page();
    assert_eq!(active_section(0.0, &sections, 100.0), Some("home"));
    assert_eq!(active_section(499.0, &sections, 100.0), Some("home"));
    assert_eq!(active_section(500.0, &sections, 100.0), Some("about"));
    assert_eq!(active_section(950.0, &sections, 100.0), Some("contact"));
}

#[test]
fn active_section_none_past_the_end() {
    assert_eq!(active_section(5000.0, &page(), 100.0), None);
    assert_eq!(active_section(0.0, &[], 100.0), None);
}

#[test]
fn later_section_wins_overlap() {
    let sections = vec![section("outer", 0.0, 1000.0), section("inner", 200.0, 100.0)];
    assert_eq!(active_section(150.0, &sections, 100.0), Some("inner"));
    assert_eq!(active_section(50.0, &sections, 100.0), Some("outer"));
}

// =============================================================
// anchor_scroll_top / reading_time_minutes
// =============================================================

#[test]
fn anchor_target_clears_navbar() {
    assert_eq!(anchor_scroll_top(600.0, 80.0), 520.0);
}

#[test]
fn reading_time_rounds_up_with_one_minute_floor() {
    assert_eq!(reading_time_minutes(""), 1);
    assert_eq!(reading_time_minutes("one two three"), 1);
    assert_eq!(reading_time_minutes(&"word ".repeat(200)), 1);
    assert_eq!(reading_time_minutes(&"word ".repeat(201)), 2);
    assert_eq!(reading_time_minutes(&"word\n\t".repeat(1000)), 5);
}

// =============================================================
// ScrollSpy
// =============================================================

#[test]
fn scroll_spy_marks_single_active_link_per_frame() {
    let flags: Vec<Rc<Cell<bool>>> = (0..4).map(|_| Rc::new(Cell::new(false))).collect();
    let hrefs = [Some("#home"), Some("#about"), Some("#contact"), None];
    let links: Vec<Box<dyn NavLink>> = hrefs
        .iter()
        .zip(&flags)
        .map(|(href, flag)| Box::new(FakeLink { href: *href, active: Rc::clone(flag) }) as Box<dyn NavLink>)
        .collect();
    let scroll = Rc::new(FakeScroll(Cell::new(0.0)));
    let scheduler = Rc::new(ManualScheduler::new());
    let spy = ScrollSpy::new(links, Rc::new(FixedSections(page())), scroll.clone(), 100.0, scheduler.clone());
    let states = || flags.iter().map(|f| f.get()).collect::<Vec<_>>();

    spy.activate_home("#home");
    assert_eq!(states(), vec![true, false, false, false]);

    scroll.0.set(700.0);
    assert!(spy.on_scroll());
    assert!(!spy.on_scroll());
    assert_eq!(states(), vec![true, false, false, false]);
    scheduler.run_frame();
    assert_eq!(states(), vec![false, true, false, false]);

    scroll.0.set(9000.0);
    spy.on_scroll();
    scheduler.run_frame();
    assert_eq!(states(), vec![false, false, false, false]);
}
