//! Error types for the session core.
use thiserror::Error;

/// Broad classification of a [`GameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value outside the operation's contract.
    InvalidArgument,
    /// A catalog lookup found nothing under the requested id.
    NotFound,
}

/// Errors raised by session operations and content lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("damage amount must be non-negative (got {amount})")]
    InvalidDamage { amount: i32 },
    #[error("buddy image reference must not be empty")]
    EmptyImageReference,
    #[error("maximum health must be greater than zero")]
    InvalidMaximumHealth,
    #[error("upload of {size} bytes exceeds the {max} byte limit")]
    UploadTooLarge { size: u64, max: u64 },
    #[error("unsupported upload type `{mime}`")]
    UnsupportedUpload { mime: String },
    #[error("unknown buddy `{id}`")]
    UnknownBuddy { id: String },
    #[error("unknown attack `{id}`")]
    UnknownAttack { id: String },
}

impl GameError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownBuddy { .. } | Self::UnknownAttack { .. } => ErrorKind::NotFound,
            Self::InvalidDamage { .. }
            | Self::EmptyImageReference
            | Self::InvalidMaximumHealth
            | Self::UploadTooLarge { .. }
            | Self::UnsupportedUpload { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Errors raised when session configuration invariants are violated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("attack `{id}` is listed more than once")]
    DuplicateAttack { id: String },
    #[error("buddy `{id}` is listed more than once")]
    DuplicateBuddy { id: String },
    #[error("buddy `{id}` has an empty image reference")]
    BuddyWithoutImage { id: String },
}

/// Errors raised while loading bundled content.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no bundled data named `{name}`")]
    UnknownSource { name: String },
    #[error("failed to parse `{name}`: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
