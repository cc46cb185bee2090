//! Ownership model for image and audio handles.
//!
//! Handles created by the application itself (object URLs with the `blob:`
//! scheme) hold browser memory until they are revoked, so the store releases
//! them whenever they are replaced or the session ends. Remote URLs are never
//! released.
use crate::constants::LOCAL_HANDLE_SCHEME;
use serde::{Deserialize, Serialize};

/// A classified reference to image or audio bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "uri", rename_all = "lowercase")]
pub enum MediaHandle {
    /// Created locally by the application and owned by the session.
    Local(String),
    /// Static or remote asset; nothing to release.
    Remote(String),
}

impl MediaHandle {
    /// Classify a raw reference. Blank input is the "no media" sentinel.
    #[must_use]
    pub fn parse(reference: &str) -> Option<Self> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.starts_with(LOCAL_HANDLE_SCHEME) {
            Some(Self::Local(trimmed.to_string()))
        } else {
            Some(Self::Remote(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local(uri) | Self::Remote(uri) => uri,
        }
    }

    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl std::fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform hook that frees a locally created handle.
pub trait MediaReleaser {
    fn release(&self, handle: &str);
}

/// Releaser for platforms without transient handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReleaser;

impl MediaReleaser for NoopReleaser {
    fn release(&self, _handle: &str) {}
}

/// Release `outgoing` unless it is remote or still in use as `incoming`.
///
/// Returns whether the releaser was invoked.
pub fn release_replaced<R: MediaReleaser + ?Sized>(
    releaser: &R,
    outgoing: Option<&MediaHandle>,
    incoming: Option<&MediaHandle>,
) -> bool {
    match outgoing {
        Some(old) if old.is_local() && Some(old) != incoming => {
            releaser.release(old.as_str());
            true
        }
        _ => false,
    }
}
