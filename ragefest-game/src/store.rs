//! The session store: single owner of buddy, recording and health.
//!
//! Screens never mutate fields directly. Every change goes through one of the
//! operations below (or [`GameStore::dispatch`]), which keeps the defeat flag
//! derived, the health invariants intact and locally created media handles
//! released exactly once.
use crate::attacks::Attack;
use crate::buddy::BuddySelection;
use crate::config::SessionConfig;
use crate::constants::LOG_TARGET_STORE;
use crate::error::GameError;
use crate::health::{HealthPhase, HealthState};
use crate::media::{MediaReleaser, NoopReleaser, release_replaced};
use crate::numbers::non_negative;
use crate::voice::VoiceRecording;
use serde::{Deserialize, Serialize};

/// Result of a successful [`GameStore::damage`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Health actually removed; less than requested when it hit the floor.
    pub dealt: u32,
    pub remaining: u32,
    /// True only on the call that moved the session into `Defeated`.
    pub defeated: bool,
}

/// Every mutation the presentation layer may request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    SetBuddy(BuddySelection),
    /// Blank reference clears the recording.
    SetVoiceRecording(String),
    ClearVoiceRecording,
    Damage(i32),
    Reset,
}

/// Transient, serializable read copy for rendering and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub buddy: Option<BuddySelection>,
    pub voice_recording: Option<String>,
    pub health: u32,
    pub max_health: u32,
    pub is_game_over: bool,
    pub phase: HealthPhase,
    pub revision: u64,
}

/// Session-scoped state container. Construct one per session and hand it
/// to the screens.
#[derive(Debug)]
pub struct GameStore<R: MediaReleaser = NoopReleaser> {
    buddy: Option<BuddySelection>,
    voice: Option<VoiceRecording>,
    health: HealthState,
    revision: u64,
    releaser: R,
}

impl GameStore<NoopReleaser> {
    /// Store with default maximum health and no handle releasing.
    #[must_use]
    pub fn detached() -> Self {
        Self::with_releaser(NoopReleaser)
    }
}

impl<R: MediaReleaser> GameStore<R> {
    /// Fresh session in the `Idle` state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidMaximumHealth`] when `max_health` is zero.
    pub fn new(max_health: u32, releaser: R) -> Result<Self, GameError> {
        Ok(Self::with_health(HealthState::new(max_health)?, releaser))
    }

    /// Fresh session at the default maximum health.
    #[must_use]
    pub fn with_releaser(releaser: R) -> Self {
        Self::with_health(HealthState::default(), releaser)
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidMaximumHealth`] when the config's maximum is zero.
    pub fn from_config(config: &SessionConfig, releaser: R) -> Result<Self, GameError> {
        Self::new(config.max_health, releaser)
    }

    fn with_health(health: HealthState, releaser: R) -> Self {
        Self {
            buddy: None,
            voice: None,
            health,
            revision: 0,
            releaser,
        }
    }

    // Reads ---------------------------------------------------------------

    #[must_use]
    pub const fn buddy(&self) -> Option<&BuddySelection> {
        self.buddy.as_ref()
    }

    #[must_use]
    pub const fn voice_recording(&self) -> Option<&VoiceRecording> {
        self.voice.as_ref()
    }

    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health.current()
    }

    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.health.maximum()
    }

    #[must_use]
    pub const fn health_state(&self) -> &HealthState {
        &self.health
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.health.is_game_over()
    }

    #[must_use]
    pub const fn phase(&self) -> HealthPhase {
        self.health.phase()
    }

    /// Bumped on every observable change; subscribers re-render when it moves.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub const fn releaser(&self) -> &R {
        &self.releaser
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            buddy: self.buddy.clone(),
            voice_recording: self
                .voice
                .as_ref()
                .map(|rec| rec.audio_reference().to_string()),
            health: self.health(),
            max_health: self.max_health(),
            is_game_over: self.is_game_over(),
            phase: self.phase(),
            revision: self.revision,
        }
    }

    // Mutations -----------------------------------------------------------

    /// Replace the buddy; last write wins. Health is untouched.
    pub fn set_buddy(&mut self, selection: BuddySelection) {
        if self.buddy.as_ref() == Some(&selection) {
            return;
        }
        release_replaced(
            &self.releaser,
            self.buddy.as_ref().map(BuddySelection::image),
            Some(selection.image()),
        );
        log::debug!(
            target: LOG_TARGET_STORE,
            "buddy set to `{}` ({})",
            selection.id(),
            selection.image_reference()
        );
        self.buddy = Some(selection);
        self.bump();
    }

    /// Replace the recording; a blank reference clears it.
    pub fn set_voice_recording(&mut self, audio_reference: &str) {
        let next = VoiceRecording::from_reference(audio_reference);
        if self.voice == next {
            return;
        }
        release_replaced(
            &self.releaser,
            self.voice.as_ref().map(VoiceRecording::audio),
            next.as_ref().map(VoiceRecording::audio),
        );
        match &next {
            Some(rec) => log::debug!(
                target: LOG_TARGET_STORE,
                "voice recording set ({})",
                rec.audio_reference()
            ),
            None => log::debug!(target: LOG_TARGET_STORE, "voice recording cleared"),
        }
        self.voice = next;
        self.bump();
    }

    pub fn clear_voice_recording(&mut self) {
        self.set_voice_recording("");
    }

    /// Remove `amount` health, flooring at zero.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDamage`] for a negative amount; the store
    /// is left unchanged.
    pub fn damage(&mut self, amount: i32) -> Result<DamageOutcome, GameError> {
        let Some(amount) = non_negative(amount) else {
            log::warn!(target: LOG_TARGET_STORE, "rejected negative damage {amount}");
            return Err(GameError::InvalidDamage { amount });
        };
        let was_over = self.health.is_game_over();
        let dealt = self.health.apply_damage(amount);
        let outcome = DamageOutcome {
            dealt,
            remaining: self.health.current(),
            defeated: !was_over && self.health.is_game_over(),
        };
        if dealt > 0 {
            log::debug!(
                target: LOG_TARGET_STORE,
                "damage {dealt} -> {}/{}",
                outcome.remaining,
                self.health.maximum()
            );
            self.bump();
        }
        if outcome.defeated {
            log::info!(target: LOG_TARGET_STORE, "buddy defeated");
        }
        Ok(outcome)
    }

    /// Apply one attack's damage.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDamage`] if the attack's damage does not fit
    /// the signed damage range.
    pub fn attack(&mut self, attack: &Attack) -> Result<DamageOutcome, GameError> {
        let amount = i32::try_from(attack.damage).map_err(|_| GameError::InvalidDamage {
            amount: i32::MAX,
        })?;
        self.damage(amount)
    }

    /// Restore full health. Buddy and recording are kept: a reset starts a
    /// new round with the same buddy.
    pub fn reset(&mut self) {
        if self.health.phase() == HealthPhase::Idle {
            return;
        }
        self.health.restore();
        log::debug!(target: LOG_TARGET_STORE, "health reset to {}", self.health.maximum());
        self.bump();
    }

    /// Apply `action`, returning whether observable state changed.
    ///
    /// # Errors
    ///
    /// Propagates [`GameError::InvalidDamage`] from [`GameAction::Damage`].
    pub fn dispatch(&mut self, action: GameAction) -> Result<bool, GameError> {
        let before = self.revision;
        match action {
            GameAction::SetBuddy(selection) => self.set_buddy(selection),
            GameAction::SetVoiceRecording(reference) => self.set_voice_recording(&reference),
            GameAction::ClearVoiceRecording => self.clear_voice_recording(),
            GameAction::Damage(amount) => {
                self.damage(amount)?;
            }
            GameAction::Reset => self.reset(),
        }
        Ok(self.revision != before)
    }

    /// Release every locally owned handle and forget buddy and recording.
    pub fn end_session(&mut self) {
        let buddy = self.buddy.take();
        let voice = self.voice.take();
        release_replaced(&self.releaser, buddy.as_ref().map(BuddySelection::image), None);
        release_replaced(&self.releaser, voice.as_ref().map(VoiceRecording::audio), None);
        if buddy.is_some() || voice.is_some() {
            log::debug!(target: LOG_TARGET_STORE, "session ended, media released");
            self.bump();
        }
    }

    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<R: MediaReleaser> Drop for GameStore<R> {
    fn drop(&mut self) {
        self.end_session();
    }
}
