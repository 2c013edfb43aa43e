//! Copy-link and share actions with graceful degradation.
//!
//! Copy tries the async clipboard first and falls back to the legacy
//! select-and-copy path; both paths produce the same success notification.
//! Share prefers the native share sheet and falls back to copying the link.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::config::ShareConfig;
use crate::error::ShareError;
use crate::notify::{NotificationKind, NotificationManager};

/// Async clipboard write (`navigator.clipboard.writeText`).
pub trait Clipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ShareError>>;
}

/// Synchronous select-and-copy fallback for browsers without the async clipboard.
pub trait LegacyCopy {
    fn copy_text(&self, text: &str) -> Result<(), ShareError>;
}

/// Native share sheet (`navigator.share`).
pub trait NativeShare {
    fn share(&self, payload: &SharePayload) -> LocalBoxFuture<'static, Result<(), ShareError>>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: Option<String>,
    pub url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Clipboard,
    Fallback,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied(CopyOutcome),
    Cancelled,
}

pub struct LinkSharer {
    clipboard: Option<Rc<dyn Clipboard>>,
    legacy: Rc<dyn LegacyCopy>,
    native: Option<Rc<dyn NativeShare>>,
    notifier: Rc<NotificationManager>,
    config: ShareConfig,
}

impl LinkSharer {
    pub fn new(
        clipboard: Option<Rc<dyn Clipboard>>,
        legacy: Rc<dyn LegacyCopy>,
        native: Option<Rc<dyn NativeShare>>,
        notifier: Rc<NotificationManager>,
        config: ShareConfig,
    ) -> Rc<Self> {
        Rc::new(Self { clipboard, legacy, native, notifier, config })
    }

    /// Copy `url` and notify the user of the result.
    pub fn copy_link(self: &Rc<Self>, url: String) -> LocalBoxFuture<'static, CopyOutcome> {
        let sharer = Rc::clone(self);
        Box::pin(async move {
            let outcome = sharer.copy_quietly(&url).await;
            match outcome {
                CopyOutcome::Clipboard | CopyOutcome::Fallback => {
                    sharer.notifier.notify(&sharer.config.copied_message, NotificationKind::Success);
                }
                CopyOutcome::Failed => {
                    sharer.notifier.notify(&sharer.config.copy_failed_message, NotificationKind::Error);
                }
            }
            outcome
        })
    }

    /// Open the native share sheet, or copy the link when it is unavailable.
    pub fn share(self: &Rc<Self>, payload: SharePayload) -> LocalBoxFuture<'static, ShareOutcome> {
        let sharer = Rc::clone(self);
        Box::pin(async move {
            if let Some(native) = &sharer.native {
                match native.share(&payload).await {
                    Ok(()) => return ShareOutcome::Shared,
                    Err(ShareError::Cancelled) => return ShareOutcome::Cancelled,
                    Err(e) => log::warn!("native share failed, copying link instead: {e}"),
                }
            }
            ShareOutcome::Copied(sharer.copy_link(payload.url).await)
        })
    }

    async fn copy_quietly(&self, url: &str) -> CopyOutcome {
        if let Some(clipboard) = &self.clipboard {
            match clipboard.write_text(url).await {
                Ok(()) => return CopyOutcome::Clipboard,
                Err(e) => log::debug!("clipboard write failed, using fallback: {e}"),
            }
        }
        match self.legacy.copy_text(url) {
            Ok(()) => CopyOutcome::Fallback,
            Err(e) => {
                log::warn!("link copy failed: {e}");
                CopyOutcome::Failed
            }
        }
    }
}
