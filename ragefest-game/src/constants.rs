//! Centralized tuning constants for the rage room session.
//!
//! Data files may override most of these through [`crate::SessionConfig`];
//! the values here are the fallbacks used when a field is absent.

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET_STORE: &str = "ragefest::store";
pub(crate) const LOG_TARGET_NAV: &str = "ragefest::navigation";

// Health -------------------------------------------------------------------
pub const DEFAULT_MAX_HEALTH: u32 = 100;
pub(crate) const HEALTHY_BAND_PCT: u8 = 60;
pub(crate) const WOUNDED_BAND_PCT: u8 = 30;

// Recording ----------------------------------------------------------------
pub const DEFAULT_RECORDING_LIMIT_SECS: u32 = 30;

// Uploads ------------------------------------------------------------------
pub const DEFAULT_UPLOAD_MAX_BYTES: u64 = 5_000_000;
pub(crate) const UPLOAD_MIME_PREFIX: &str = "image/";
pub const UPLOADED_BUDDY_ID: &str = "uploaded";
pub const UPLOADED_BUDDY_LABEL: &str = "Uploaded Buddy";

// Media handles ------------------------------------------------------------
pub(crate) const LOCAL_HANDLE_SCHEME: &str = "blob:";

// Battle pacing (milliseconds) --------------------------------------------
pub(crate) const ATTACK_SETTLE_MS: u32 = 200;
pub(crate) const ATTACK_RECOVER_MS: u32 = 800;
pub(crate) const VICTORY_DELAY_MS: u32 = 500;
pub(crate) const GUARD_GRACE_MS: u32 = 500;

// Assets -------------------------------------------------------------------
pub(crate) const DEFEAT_SOUND: &str =
    "https://assets.mixkit.co/active_storage/sfx/270/270-preview.mp3";
pub(crate) const PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/300x300/FF6B6B/ffffff?text=Buddy";

// Messages -----------------------------------------------------------------
pub const MSG_SELECT_BUDDY_FIRST: &str = "Please select a buddy first!";
pub const MSG_SELECT_OR_UPLOAD: &str = "Please select or upload a buddy!";
pub const MSG_RECORD_FIRST: &str = "Please record your voice first!";
pub const MSG_VICTORY: &str = "Buddy defeated! Your rage has been vented!";
pub const MSG_PLAY_AGAIN: &str = "Buddy reset! Keep venting your rage!";
pub const LABEL_DEFEATED: &str = "DEFEATED!";
pub const LABEL_ALMOST_DEFEATED: &str = "ALMOST DEFEATED!";
