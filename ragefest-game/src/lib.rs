//! Buddy Beat Rage Fest game core
//!
//! Platform-agnostic session logic for the rage room: the GameState store,
//! buddy and voice media ownership, health rules, attack content and the
//! navigation guards. No browser APIs are referenced here; the web crate
//! injects a [`MediaReleaser`] and renders from store snapshots.

pub mod attacks;
pub mod buddy;
pub mod config;
pub mod constants;
pub mod error;
pub mod health;
pub mod media;
pub mod navigation;
pub mod numbers;
pub mod store;
pub mod voice;

pub use attacks::{Attack, AttackCatalog, ToneSpec};
pub use buddy::{BuddyCatalog, BuddySelection, PremadeBuddy, UploadPolicy};
pub use config::{GameContent, SessionConfig};
pub use error::{ConfigError, ErrorKind, GameError, LoadError};
pub use health::{HealthBand, HealthPhase, HealthState};
pub use media::{MediaHandle, MediaReleaser, NoopReleaser};
pub use navigation::{GuardOutcome, GuardReason, Screen, advance, guard, on_enter};
pub use store::{DamageOutcome, GameAction, GameSnapshot, GameStore};
pub use voice::{ClockTick, RecordingClock, VoiceRecording};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Trait for abstracting where game content comes from.
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load one named data file (`session`, `attacks` or `buddies`).
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unknown or cannot be parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned;

    /// Load the full content bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three data files fails to load.
    fn load_content(&self) -> Result<GameContent, Self::Error> {
        Ok(GameContent {
            config: self.load_config("session")?,
            attacks: self.load_config("attacks")?,
            buddies: self.load_config("buddies")?,
        })
    }
}

/// Loader for the JSON embedded at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataLoader;

impl DataLoader for StaticDataLoader {
    type Error = LoadError;

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let raw = match config_name {
            "session" => config::DEFAULT_SESSION_DATA,
            "attacks" => attacks::DEFAULT_ATTACK_DATA,
            "buddies" => buddy::DEFAULT_BUDDY_DATA,
            other => {
                return Err(LoadError::UnknownSource {
                    name: other.to_string(),
                });
            }
        };
        serde_json::from_str(raw).map_err(|source| LoadError::Parse {
            name: config_name.to_string(),
            source,
        })
    }
}

/// Entry point that turns loaded content into ready-to-play sessions.
pub struct GameEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> GameEngine<L>
where
    L: DataLoader,
{
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Load and validate all content.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the content breaks an invariant.
    pub fn content(&self) -> anyhow::Result<GameContent> {
        let content = self
            .data_loader
            .load_content()
            .context("loading game content")?;
        content.validate().context("validating game content")?;
        Ok(content)
    }

    /// Construct a fresh session store sized from the loaded config.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be loaded or validated.
    pub fn create_session<R: MediaReleaser>(&self, releaser: R) -> anyhow::Result<GameStore<R>> {
        let content = self.content()?;
        self.session_from(&content, releaser)
    }

    /// Construct a session from content the caller already holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the config's maximum health is zero.
    pub fn session_from<R: MediaReleaser>(
        &self,
        content: &GameContent,
        releaser: R,
    ) -> anyhow::Result<GameStore<R>> {
        let store = GameStore::from_config(&content.config, releaser)?;
        log::debug!(
            target: "ragefest::engine",
            "session created with max health {}",
            store.max_health()
        );
        Ok(store)
    }
}

impl Default for GameEngine<StaticDataLoader> {
    fn default() -> Self {
        Self::new(StaticDataLoader)
    }
}
