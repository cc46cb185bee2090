//! Buddy selection, the premade catalog, and upload validation.
use crate::constants::{
    DEFAULT_UPLOAD_MAX_BYTES, UPLOAD_MIME_PREFIX, UPLOADED_BUDDY_ID, UPLOADED_BUDDY_LABEL,
};
use crate::error::{ConfigError, GameError};
use crate::media::MediaHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub(crate) const DEFAULT_BUDDY_DATA: &str =
    include_str!("../../ragefest-web/static/assets/data/buddies.json");

/// The image the player has chosen to beat up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuddySelection {
    id: String,
    image: MediaHandle,
    display_label: String,
}

impl BuddySelection {
    /// Build a selection, rejecting an empty image reference.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyImageReference`] when `image_reference` is blank.
    pub fn new(
        id: impl Into<String>,
        image_reference: &str,
        display_label: impl Into<String>,
    ) -> Result<Self, GameError> {
        let image = MediaHandle::parse(image_reference).ok_or(GameError::EmptyImageReference)?;
        Ok(Self {
            id: id.into(),
            image,
            display_label: display_label.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn image(&self) -> &MediaHandle {
        &self.image
    }

    #[must_use]
    pub fn image_reference(&self) -> &str {
        self.image.as_str()
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.display_label
    }
}

/// A catalog entry shipped with the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremadeBuddy {
    pub id: String,
    pub src: String,
    pub alt: String,
}

impl PremadeBuddy {
    /// # Errors
    ///
    /// Returns [`GameError::EmptyImageReference`] when the entry has no image.
    pub fn to_selection(&self) -> Result<BuddySelection, GameError> {
        BuddySelection::new(self.id.clone(), &self.src, self.alt.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuddyCatalog(pub Vec<PremadeBuddy>);

impl BuddyCatalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self(vec![])
    }

    /// Load the catalog from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into buddy entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Catalog embedded at compile time; empty if the bundled data is malformed.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_BUDDY_DATA).unwrap_or_else(|err| {
            log::warn!("bundled buddy catalog is invalid: {err}");
            Self::empty()
        })
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&PremadeBuddy> {
        self.0.iter().find(|buddy| buddy.id == id)
    }

    /// Resolve a premade id into a store-ready selection.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownBuddy`] for ids missing from the catalog.
    pub fn selection(&self, id: &str) -> Result<BuddySelection, GameError> {
        self.find(id)
            .ok_or_else(|| GameError::UnknownBuddy { id: id.to_string() })?
            .to_selection()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PremadeBuddy> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// # Errors
    ///
    /// Returns the first duplicate id or image-less entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for buddy in &self.0 {
            if !seen.insert(buddy.id.as_str()) {
                return Err(ConfigError::DuplicateBuddy {
                    id: buddy.id.clone(),
                });
            }
            if buddy.src.trim().is_empty() {
                return Err(ConfigError::BuddyWithoutImage {
                    id: buddy.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Size and type limits applied to user uploads before a handle is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

impl UploadPolicy {
    #[must_use]
    pub const fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// # Errors
    ///
    /// Returns [`GameError::UploadTooLarge`] or [`GameError::UnsupportedUpload`].
    pub fn validate(&self, size: u64, mime: &str) -> Result<(), GameError> {
        if size > self.max_bytes {
            return Err(GameError::UploadTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        // Browsers report an empty type for some files; accept those the
        // same way the file picker's `image/*` filter does.
        if !mime.is_empty() && !mime.starts_with(UPLOAD_MIME_PREFIX) {
            return Err(GameError::UnsupportedUpload {
                mime: mime.to_string(),
            });
        }
        Ok(())
    }

    /// Selection for an upload whose handle has already been created.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyImageReference`] when `handle` is blank.
    pub fn uploaded_selection(&self, handle: &str) -> Result<BuddySelection, GameError> {
        BuddySelection::new(UPLOADED_BUDDY_ID, handle, UPLOADED_BUDDY_LABEL)
    }
}
