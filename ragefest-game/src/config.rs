//! Session configuration and bundled game content.
use crate::attacks::AttackCatalog;
use crate::buddy::{BuddyCatalog, UploadPolicy};
use crate::constants;
use crate::error::ConfigError;
use crate::voice::RecordingClock;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_SESSION_DATA: &str =
    include_str!("../../ragefest-web/static/assets/data/session.json");

/// Tunables for one play session. Every field falls back to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_max_health")]
    pub max_health: u32,
    #[serde(default = "SessionConfig::default_recording_limit_secs")]
    pub recording_limit_secs: u32,
    #[serde(default = "SessionConfig::default_upload_max_bytes")]
    pub upload_max_bytes: u64,
    /// Delay between an attack gesture and its damage landing.
    #[serde(default = "SessionConfig::default_attack_settle_ms")]
    pub attack_settle_ms: u32,
    /// Time the attack overlay stays up after damage lands.
    #[serde(default = "SessionConfig::default_attack_recover_ms")]
    pub attack_recover_ms: u32,
    #[serde(default = "SessionConfig::default_victory_delay_ms")]
    pub victory_delay_ms: u32,
    /// Grace period before the battle screen bounces a player with no buddy.
    #[serde(default = "SessionConfig::default_guard_grace_ms")]
    pub guard_grace_ms: u32,
    #[serde(default = "SessionConfig::default_playback_volume")]
    pub playback_volume: f32,
    #[serde(default = "SessionConfig::default_defeat_sound")]
    pub defeat_sound: String,
    #[serde(default = "SessionConfig::default_placeholder_image")]
    pub placeholder_image: String,
}

impl SessionConfig {
    const fn default_max_health() -> u32 {
        constants::DEFAULT_MAX_HEALTH
    }

    const fn default_recording_limit_secs() -> u32 {
        constants::DEFAULT_RECORDING_LIMIT_SECS
    }

    const fn default_upload_max_bytes() -> u64 {
        constants::DEFAULT_UPLOAD_MAX_BYTES
    }

    const fn default_attack_settle_ms() -> u32 {
        constants::ATTACK_SETTLE_MS
    }

    const fn default_attack_recover_ms() -> u32 {
        constants::ATTACK_RECOVER_MS
    }

    const fn default_victory_delay_ms() -> u32 {
        constants::VICTORY_DELAY_MS
    }

    const fn default_guard_grace_ms() -> u32 {
        constants::GUARD_GRACE_MS
    }

    const fn default_playback_volume() -> f32 {
        0.7
    }

    fn default_defeat_sound() -> String {
        constants::DEFEAT_SOUND.to_string()
    }

    fn default_placeholder_image() -> String {
        constants::PLACEHOLDER_IMAGE.to_string()
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_SESSION_DATA).unwrap_or_else(|err| {
            log::warn!("bundled session config is invalid: {err}");
            Self::default()
        })
    }

    /// Check the invariants the store and screens rely on.
    ///
    /// # Errors
    ///
    /// Returns the first zero-valued limit found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::Zero {
                field: "max_health",
            });
        }
        if self.recording_limit_secs == 0 {
            return Err(ConfigError::Zero {
                field: "recording_limit_secs",
            });
        }
        if self.upload_max_bytes == 0 {
            return Err(ConfigError::Zero {
                field: "upload_max_bytes",
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(self.upload_max_bytes)
    }

    #[must_use]
    pub const fn recording_clock(&self) -> RecordingClock {
        RecordingClock::new(self.recording_limit_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_health: Self::default_max_health(),
            recording_limit_secs: Self::default_recording_limit_secs(),
            upload_max_bytes: Self::default_upload_max_bytes(),
            attack_settle_ms: Self::default_attack_settle_ms(),
            attack_recover_ms: Self::default_attack_recover_ms(),
            victory_delay_ms: Self::default_victory_delay_ms(),
            guard_grace_ms: Self::default_guard_grace_ms(),
            playback_volume: Self::default_playback_volume(),
            defeat_sound: Self::default_defeat_sound(),
            placeholder_image: Self::default_placeholder_image(),
        }
    }
}

/// Everything the screens need besides the live store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameContent {
    pub config: SessionConfig,
    pub attacks: AttackCatalog,
    pub buddies: BuddyCatalog,
}

impl GameContent {
    /// # Errors
    ///
    /// Returns the first invariant violated by the config or either catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.attacks.validate()?;
        self.buddies.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let bundled = SessionConfig::load_from_static();
        let defaults = SessionConfig::default();
        assert!((bundled.playback_volume - defaults.playback_volume).abs() < f32::EPSILON);
        assert_eq!(
            SessionConfig {
                playback_volume: defaults.playback_volume,
                ..bundled
            },
            defaults
        );
    }

    #[test]
    fn missing_fields_fall_back() {
        let cfg = SessionConfig::from_json(r#"{ "max_health": 40 }"#).unwrap();
        assert_eq!(cfg.max_health, 40);
        assert_eq!(cfg.recording_limit_secs, 30);
        assert_eq!(cfg.upload_max_bytes, 5_000_000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let cfg = SessionConfig {
            max_health: 0,
            ..SessionConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Zero {
                field: "max_health"
            })
        );
        let cfg = SessionConfig {
            recording_limit_secs: 0,
            ..SessionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bundled_content_is_valid() {
        let content = crate::GameEngine::default().content().unwrap();
        assert!(content.validate().is_ok());
        assert_eq!(content.config.recording_clock().limit_secs(), 30);
        assert_eq!(content.config.upload_policy().max_bytes, 5_000_000);
    }
}
