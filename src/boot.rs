//! Page-load wiring and the functions exported to JavaScript.
//!
//! SYSTEM CONTEXT
//! ==============
//! The module start hook installs logging, waits for the DOM, reads the
//! optional JSON override and wires each component against the elements it
//! finds. A component whose elements are missing is skipped; the others still
//! start. Listeners live for the page, so their closures are leaked to JS.
//!
//! The components the exported functions reach are kept in a thread-local
//! [`Site`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlButtonElement, HtmlInputElement};

use crate::config::{
    CONFIG_ELEMENT_ID, FilterConfig, NavConfig, NewsletterConfig, ParallaxConfig, ShareConfig, SiteConfig,
    ThemeConfig,
};
use crate::dom::cards::DomCard;
use crate::dom::forms::{ButtonControl, InputField};
use crate::dom::icons::{LucideRenderer, ToggleIcons};
use crate::dom::observer::observe_reveals;
use crate::dom::scroll::{
    DomNavLink, DomSections, StyleTransform, WindowScroll, on_scroll, smooth_anchors, smooth_scroll_to,
};
use crate::dom::share::{NavigatorClipboard, NavigatorShare, TextareaCopy};
use crate::dom::storage::{DocumentRoot, LocalStorage};
use crate::dom::timers::BrowserScheduler;
use crate::dom::toast::{DomToastHost, inject_styles};
use crate::dom::{self, listen, logged, query, query_all, query_in};
use crate::filter::{CardFilter, CardView};
use crate::icons::{IconPair, IconReflector};
use crate::nav::{NavLink, ScrollSpy};
use crate::newsletter::{NewsletterFlow, SimulatedSubscriber};
use crate::notify::{NotificationKind, NotificationManager};
use crate::reveal::{ParallaxEffect, ScrollSource};
use crate::scheduler::Scheduler;
use crate::share::{Clipboard, LinkSharer, NativeShare, SharePayload};
use crate::theme::ThemeStore;

struct Site {
    theme: Rc<ThemeStore>,
    notifier: Rc<NotificationManager>,
    sharer: Rc<LinkSharer>,
}

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        listen(&document, "DOMContentLoaded", |_| mount());
    } else {
        mount();
    }
}

fn mount() {
    let Some(document) = dom::document() else {
        return;
    };
    let config = load_config(&document);
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());

    inject_styles(&document);
    let theme = wire_theme(&document, &config.theme);
    let notifier = NotificationManager::new(
        Rc::new(DomToastHost::new(document.clone())),
        Rc::clone(&scheduler),
        config.notifications,
    );
    wire_newsletter(&document, &config.newsletter, &notifier, &scheduler);
    wire_filter(&document, config.filter.clone(), &scheduler);
    wire_scrolling(&document, &config.parallax, &config.nav, &scheduler);
    let reveals = observe_reveals(&document, &config.reveal);
    let sharer = wire_share(&document, &config.share, &notifier);

    log::info!("folio ready: theme {}, {} reveal targets", theme.get(), reveals.borrow().len());
    SITE.with(|site| *site.borrow_mut() = Some(Site { theme, notifier, sharer }));
}

/// Defaults, overlaid with the page's embedded JSON when present and valid.
fn load_config(document: &Document) -> SiteConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return SiteConfig::default();
    };
    let raw = element.text_content().unwrap_or_default();
    match SiteConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            SiteConfig::default()
        }
    }
}

fn wire_theme(document: &Document, config: &ThemeConfig) -> Rc<ThemeStore> {
    let toggle = query(document, &config.toggle_selector);
    let pair = toggle
        .clone()
        .and_then(|toggle| ToggleIcons::find(toggle, config))
        .map(|icons| Box::new(icons) as Box<dyn IconPair>);
    let icons = Rc::new(IconReflector::new(pair, Rc::new(LucideRenderer)));
    let store = Rc::new(
        ThemeStore::new(Rc::new(LocalStorage), Rc::new(DocumentRoot::new(&config.attribute)), &config.storage_key)
            .with_icons(icons),
    );
    store.init();

    if let Some(toggle) = toggle {
        let store = Rc::clone(&store);
        listen(&toggle, "click", move |_| {
            store.toggle();
        });
    }
    store
}

fn wire_newsletter(
    document: &Document,
    config: &NewsletterConfig,
    notifier: &Rc<NotificationManager>,
    scheduler: &Rc<dyn Scheduler>,
) {
    let Some(form) = query(document, &config.form_selector) else {
        return;
    };
    let input = query_in(&form, &config.input_selector).and_then(|el| el.dyn_ref::<HtmlInputElement>().cloned());
    let button = query_in(&form, &config.button_selector).and_then(|el| el.dyn_ref::<HtmlButtonElement>().cloned());
    let (Some(input), Some(button)) = (input, button) else {
        log::warn!("newsletter form is missing its email input or submit button");
        return;
    };

    let flow = NewsletterFlow::new(
        Box::new(ButtonControl::new(button, &config.success_class)),
        Box::new(InputField(input)),
        Rc::new(SimulatedSubscriber::new(Rc::clone(scheduler), config.latency_ms)),
        Rc::clone(notifier),
        Rc::clone(scheduler),
        config.clone(),
    );
    listen(&form, "submit", move |event| {
        event.prevent_default();
        match flow.submit() {
            Ok(cycle) => spawn_local(cycle),
            Err(e) => log::debug!("newsletter submit rejected: {e}"),
        }
    });
}

fn wire_filter(document: &Document, config: FilterConfig, scheduler: &Rc<dyn Scheduler>) {
    let Some(search) = query(document, &config.search_selector).and_then(|el| el.dyn_ref::<HtmlInputElement>().cloned())
    else {
        return;
    };
    let selectors = Rc::new(config);
    let cards: Vec<Box<dyn CardView>> = query_all(document, &selectors.card_selector)
        .into_iter()
        .map(|card| Box::new(DomCard::new(card, Rc::clone(&selectors))) as Box<dyn CardView>)
        .collect();
    let filter = CardFilter::new(cards, Rc::clone(scheduler), selectors.debounce_ms);

    let input = search.clone();
    listen(&search, "input", move |_| filter.on_input(input.value()));
}

/// Parallax header, scroll-spy and smooth in-page anchors.
fn wire_scrolling(document: &Document, parallax: &ParallaxConfig, nav: &NavConfig, scheduler: &Rc<dyn Scheduler>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let source: Rc<dyn ScrollSource> = Rc::new(WindowScroll);

    let header = query(document, &parallax.header_selector).map(|header| {
        ParallaxEffect::new(Rc::clone(&source), Rc::new(StyleTransform(header)), parallax.factor, Rc::clone(scheduler))
    });

    let links: Vec<Box<dyn NavLink>> = query_all(document, &nav.link_selector)
        .into_iter()
        .map(|link| Box::new(DomNavLink::new(link, &nav.active_class)) as Box<dyn NavLink>)
        .collect();
    let spy = (!links.is_empty()).then(|| {
        let sections = Rc::new(DomSections::new(document.clone(), &nav.section_selector));
        let spy = ScrollSpy::new(links, sections, Rc::clone(&source), nav.spy_offset_px, Rc::clone(scheduler));
        spy.activate_home(&nav.home_href);
        spy
    });

    if header.is_some() || spy.is_some() {
        on_scroll(&window, move || {
            if let Some(header) = &header {
                header.on_scroll();
            }
            if let Some(spy) = &spy {
                spy.on_scroll();
            }
        });
    }

    let anchors = smooth_anchors(document, &nav.anchor_selector, nav.anchor_offset_px);
    log::debug!("{anchors} in-page anchors scroll smoothly");
}

fn wire_share(document: &Document, config: &ShareConfig, notifier: &Rc<NotificationManager>) -> Rc<LinkSharer> {
    let sharer = LinkSharer::new(
        NavigatorClipboard::detect().map(|clipboard| Rc::new(clipboard) as Rc<dyn Clipboard>),
        Rc::new(TextareaCopy),
        NavigatorShare::detect().map(|share| Rc::new(share) as Rc<dyn NativeShare>),
        Rc::clone(notifier),
        config.clone(),
    );
    for button in query_all(document, &config.copy_selector) {
        let sharer = Rc::clone(&sharer);
        listen(&button, "click", move |event| {
            event.prevent_default();
            spawn_copy(&sharer);
        });
    }
    for button in query_all(document, &config.share_selector) {
        let sharer = Rc::clone(&sharer);
        listen(&button, "click", move |event| {
            event.prevent_default();
            spawn_share(&sharer);
        });
    }
    sharer
}

fn current_url() -> Option<String> {
    logged("location.href", web_sys::window()?.location().href())
}

fn spawn_copy(sharer: &Rc<LinkSharer>) {
    let Some(url) = current_url() else {
        return;
    };
    let pending = sharer.copy_link(url);
    spawn_local(async move {
        let outcome = pending.await;
        log::debug!("copy link: {outcome:?}");
    });
}

fn spawn_share(sharer: &Rc<LinkSharer>) {
    let Some(url) = current_url() else {
        return;
    };
    let title = dom::document().map(|d| d.title()).unwrap_or_default();
    let pending = sharer.share(SharePayload { title, text: None, url });
    spawn_local(async move {
        let outcome = pending.await;
        log::debug!("share: {outcome:?}");
    });
}

fn with_site<T>(f: impl FnOnce(&Site) -> T) -> Option<T> {
    SITE.with(|site| {
        let site = site.borrow();
        if site.is_none() {
            log::warn!("folio is not mounted yet");
        }
        site.as_ref().map(f)
    })
}

// =============================================================
// JS surface
// =============================================================

/// Show a toast. `kind` is `"info"`, `"success"` or `"error"`; anything
/// else is treated as info.
#[wasm_bindgen]
pub fn notify(message: &str, kind: Option<String>) {
    let kind = kind.as_deref().map_or(NotificationKind::Info, NotificationKind::from_name);
    with_site(|site| {
        site.notifier.notify(message, kind);
    });
}

#[wasm_bindgen]
pub fn scroll_to_top() {
    smooth_scroll_to(0.0);
}

#[wasm_bindgen]
pub fn copy_link() {
    with_site(|site| spawn_copy(&site.sharer));
}

#[wasm_bindgen]
pub fn share_post() {
    with_site(|site| spawn_share(&site.sharer));
}

/// Flip the theme and return the new one.
#[wasm_bindgen]
pub fn toggle_theme() -> Option<String> {
    with_site(|site| site.theme.toggle().as_str().to_owned())
}
