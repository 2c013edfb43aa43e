//! Error types shared across the interactivity components.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal to the page. Each error degrades exactly one feature:
//! validation failures become notifications, capability failures fall back to a
//! degraded path, and configuration failures fall back to defaults.

/// Error returned by [`crate::config::SiteConfig::from_json`] and
/// [`crate::config::SiteConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The embedded JSON could not be parsed into a config.
    #[error("failed to parse site config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A numeric setting is outside its accepted range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Durable key-value storage failed to persist a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage area is available (private mode, sandboxed iframe, SSR).
    #[error("storage is unavailable")]
    Unavailable,
    /// The write was rejected, typically because the quota is exhausted.
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

/// A newsletter subscription attempt failed after validation passed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscribeError {
    #[error("subscription service unavailable")]
    Unavailable,
    #[error("subscription rejected: {0}")]
    Rejected(String),
}

/// A newsletter submission was refused before any state change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
    #[error("a subscription is already in progress")]
    InProgress,
}

/// Clipboard or native-share capability failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    /// The capability is not exposed by this browser.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
    /// The user dismissed the native share sheet.
    #[error("share was cancelled")]
    Cancelled,
    /// The capability exists but the call failed.
    #[error("{capability} failed: {message}")]
    Failed { capability: &'static str, message: String },
}
