use super::*;

use std::cell::RefCell;

use futures::executor::block_on;

use crate::config::NotificationConfig;
use crate::notify::{NotificationId, ToastHost, ToastStage};
use crate::scheduler::ManualScheduler;

#[derive(Default)]
struct Toasts(RefCell<Vec<(String, NotificationKind)>>);

impl ToastHost for Toasts {
    fn mount(&self, _id: NotificationId, message: &str, kind: NotificationKind, _on_close: Box<dyn Fn()>) {
        self.0.borrow_mut().push((message.to_owned(), kind));
    }

    fn set_stage(&self, _id: NotificationId, _stage: ToastStage) {}

    fn unmount(&self, _id: NotificationId) {}
}

struct FakeClipboard {
    result: Result<(), ShareError>,
    written: RefCell<Vec<String>>,
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ShareError>> {
        self.written.borrow_mut().push(text.to_owned());
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

struct FakeLegacy {
    result: Result<(), ShareError>,
    copied: RefCell<Vec<String>>,
}

impl LegacyCopy for FakeLegacy {
    fn copy_text(&self, text: &str) -> Result<(), ShareError> {
        self.copied.borrow_mut().push(text.to_owned());
        self.result.clone()
    }
}

struct FakeNative(Result<(), ShareError>);

impl NativeShare for FakeNative {
    fn share(&self, _payload: &SharePayload) -> LocalBoxFuture<'static, Result<(), ShareError>> {
        let result = self.0.clone();
        Box::pin(async move { result })
    }
}

struct Setup {
    sharer: Rc<LinkSharer>,
    toasts: Rc<Toasts>,
    clipboard: Option<Rc<FakeClipboard>>,
    legacy: Rc<FakeLegacy>,
}

fn setup(
    clipboard: Option<Result<(), ShareError>>,
    legacy: Result<(), ShareError>,
    native: Option<Result<(), ShareError>>,
) -> Setup {
    let toasts = Rc::new(Toasts::default());
    let notifier = NotificationManager::new(toasts.clone(), Rc::new(ManualScheduler::new()), NotificationConfig::default());
    let clipboard = clipboard.map(|result| Rc::new(FakeClipboard { result, written: RefCell::default() }));
    let legacy = Rc::new(FakeLegacy { result: legacy, copied: RefCell::default() });
    let sharer = LinkSharer::new(
        clipboard.clone().map(|c| c as Rc<dyn Clipboard>),
        legacy.clone(),
        native.map(|result| Rc::new(FakeNative(result)) as Rc<dyn NativeShare>),
        notifier,
        ShareConfig::default(),
    );
    Setup { sharer, toasts, clipboard, legacy }
}

fn failed(capability: &'static str) -> Result<(), ShareError> {
    Err(ShareError::Failed { capability, message: "denied".into() })
}

const URL: &str = "https://example.com/blog/post";

// =============================================================
// copy_link
// =============================================================

#[test]
fn copy_uses_clipboard_when_available() {
    let s = setup(Some(Ok(())), Ok(()), None);
    assert_eq!(block_on(s.sharer.copy_link(URL.into())), CopyOutcome::Clipboard);
    assert!(s.legacy.copied.borrow().is_empty());
    assert_eq!(
        *s.toasts.0.borrow(),
        vec![("Link copied to clipboard!".to_owned(), NotificationKind::Success)]
    );
}

#[test]
fn copy_falls_back_with_same_notification() {
    let s = setup(Some(failed("clipboard")), Ok(()), None);
    assert_eq!(block_on(s.sharer.copy_link(URL.into())), CopyOutcome::Fallback);
    let clipboard = s.clipboard.as_ref().expect("clipboard configured");
    assert_eq!(*clipboard.written.borrow(), vec![URL.to_owned()]);
    assert_eq!(*s.legacy.copied.borrow(), vec![URL.to_owned()]);
    assert_eq!(
        *s.toasts.0.borrow(),
        vec![("Link copied to clipboard!".to_owned(), NotificationKind::Success)]
    );
}

#[test]
fn copy_without_clipboard_goes_straight_to_fallback() {
    let s = setup(None, Ok(()), None);
    assert_eq!(block_on(s.sharer.copy_link(URL.into())), CopyOutcome::Fallback);
}

#[test]
fn copy_reports_error_when_every_path_fails() {
    let s = setup(None, failed("execCommand"), None);
    assert_eq!(block_on(s.sharer.copy_link(URL.into())), CopyOutcome::Failed);
    assert_eq!(*s.toasts.0.borrow(), vec![("Could not copy the link".to_owned(), NotificationKind::Error)]);
}

// =============================================================
// share
// =============================================================

fn payload() -> SharePayload {
    SharePayload { title: "Post".into(), text: None, url: URL.into() }
}

#[test]
fn native_share_is_preferred() {
    let s = setup(Some(Ok(())), Ok(()), Some(Ok(())));
    assert_eq!(block_on(s.sharer.share(payload())), ShareOutcome::Shared);
    assert!(s.toasts.0.borrow().is_empty());
}

#[test]
fn cancelled_share_does_nothing_else() {
    let s = setup(Some(Ok(())), Ok(()), Some(Err(ShareError::Cancelled)));
    assert_eq!(block_on(s.sharer.share(payload())), ShareOutcome::Cancelled);
    assert!(s.toasts.0.borrow().is_empty());
    assert!(s.legacy.copied.borrow().is_empty());
}

#[test]
fn missing_or_failing_native_share_copies_instead() {
    let s = setup(Some(Ok(())), Ok(()), None);
    assert_eq!(block_on(s.sharer.share(payload())), ShareOutcome::Copied(CopyOutcome::Clipboard));

    let s = setup(None, Ok(()), Some(failed("share")));
    assert_eq!(block_on(s.sharer.share(payload())), ShareOutcome::Copied(CopyOutcome::Fallback));
    assert_eq!(s.toasts.0.borrow().len(), 1);
}
