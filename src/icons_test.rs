use super::*;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

struct FakePair {
    visible: Rc<RefCell<HashMap<ThemeIcon, bool>>>,
}

impl IconPair for FakePair {
    fn set_visible(&self, icon: ThemeIcon, visible: bool) {
        self.visible.borrow_mut().insert(icon, visible);
    }
}

#[derive(Default)]
struct CountingRenderer {
    passes: Cell<usize>,
}

impl IconRenderer for CountingRenderer {
    fn render_icons(&self) {
        self.passes.set(self.passes.get() + 1);
    }
}

#[test]
fn dark_theme_shows_sun() {
    assert_eq!(visible_icon(Theme::Dark), ThemeIcon::Sun);
    assert_eq!(visible_icon(Theme::Light), ThemeIcon::Moon);
}

#[test]
fn reflect_shows_exactly_one_icon() {
    let visible = Rc::new(RefCell::new(HashMap::new()));
    let renderer = Rc::new(CountingRenderer::default());
    let reflector = IconReflector::new(Some(Box::new(FakePair { visible: Rc::clone(&visible) })), renderer.clone());

    reflector.reflect(Theme::Light);
    assert_eq!(visible.borrow().get(&ThemeIcon::Moon), Some(&true));
    assert_eq!(visible.borrow().get(&ThemeIcon::Sun), Some(&false));

    reflector.reflect(Theme::Dark);
    assert_eq!(visible.borrow().get(&ThemeIcon::Moon), Some(&false));
    assert_eq!(visible.borrow().get(&ThemeIcon::Sun), Some(&true));
    assert_eq!(renderer.passes.get(), 2);
}

#[test]
fn missing_icons_is_noop() {
    let renderer = Rc::new(CountingRenderer::default());
    let reflector = IconReflector::new(None, renderer.clone());
    reflector.reflect(Theme::Dark);
    assert_eq!(renderer.passes.get(), 0);
}

#[test]
fn absent_icon_library_is_tolerated() {
    let visible = Rc::new(RefCell::new(HashMap::new()));
    let reflector = IconReflector::new(Some(Box::new(FakePair { visible: Rc::clone(&visible) })), Rc::new(NoIconRenderer));
    reflector.reflect(Theme::Dark);
    assert_eq!(visible.borrow().len(), 2);
}
