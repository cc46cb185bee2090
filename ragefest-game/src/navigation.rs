//! Screens, their paths, and the store-driven rules for moving between them.
use crate::constants::{LOG_TARGET_NAV, MSG_RECORD_FIRST, MSG_SELECT_BUDDY_FIRST};
use crate::media::MediaReleaser;
use crate::store::GameStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Home,
    SelectBuddy,
    RecordVoice,
    Battle,
    NotFound,
}

impl Screen {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::SelectBuddy,
        Self::RecordVoice,
        Self::Battle,
        Self::NotFound,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::SelectBuddy => "/select-buddy",
            Self::RecordVoice => "/record-voice",
            Self::Battle => "/play-game",
            Self::NotFound => "/404",
        }
    }

    /// Resolve a location path; `/play-page` is a legacy alias of the battle.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/select-buddy" => Self::SelectBuddy,
            "/record-voice" => Self::RecordVoice,
            "/play-game" | "/play-page" => Self::Battle,
            _ => Self::NotFound,
        }
    }

    /// Where the "Back" button leads.
    #[must_use]
    pub const fn back(self) -> Self {
        match self {
            Self::RecordVoice => Self::SelectBuddy,
            Self::Home | Self::SelectBuddy | Self::Battle | Self::NotFound => Self::Home,
        }
    }
}

/// Why a navigation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardReason {
    NoBuddy,
    NoRecording,
}

impl GuardReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoBuddy => MSG_SELECT_BUDDY_FIRST,
            Self::NoRecording => MSG_RECORD_FIRST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect { to: Screen, reason: GuardReason },
}

/// Decide whether `screen` may be shown for the current store state.
#[must_use]
pub fn guard<R: MediaReleaser>(screen: Screen, store: &GameStore<R>) -> GuardOutcome {
    let has_buddy = store.buddy().is_some();
    let outcome = match screen {
        Screen::RecordVoice if !has_buddy => GuardOutcome::Redirect {
            to: Screen::SelectBuddy,
            reason: GuardReason::NoBuddy,
        },
        Screen::Battle if !has_buddy => GuardOutcome::Redirect {
            to: Screen::Home,
            reason: GuardReason::NoBuddy,
        },
        _ => GuardOutcome::Allow,
    };
    if let GuardOutcome::Redirect { to, reason } = outcome {
        log::warn!(target: LOG_TARGET_NAV, "{screen:?} refused ({reason:?}), redirecting to {to:?}");
    }
    outcome
}

/// The "Continue" step from `from`.
///
/// # Errors
///
/// Returns the [`GuardReason`] when the store lacks what the next screen needs.
pub fn advance<R: MediaReleaser>(from: Screen, store: &GameStore<R>) -> Result<Screen, GuardReason> {
    match from {
        Screen::Home | Screen::NotFound => Ok(Screen::SelectBuddy),
        Screen::SelectBuddy => store
            .buddy()
            .map(|_| Screen::RecordVoice)
            .ok_or(GuardReason::NoBuddy),
        Screen::RecordVoice => store
            .voice_recording()
            .map(|_| Screen::Battle)
            .ok_or(GuardReason::NoRecording),
        Screen::Battle => Ok(Screen::Battle),
    }
}

/// Side effects of arriving on `screen`. Home starts a fresh round.
pub fn on_enter<R: MediaReleaser>(screen: Screen, store: &mut GameStore<R>) {
    if screen == Screen::Home {
        store.reset();
    }
    log::debug!(target: LOG_TARGET_NAV, "entered {screen:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buddy::BuddySelection;

    fn store_with_buddy() -> GameStore {
        let mut store = GameStore::detached();
        store.set_buddy(BuddySelection::new("buddy-1", "https://x/a.png", "A").unwrap());
        store
    }

    #[test]
    fn paths_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_path(screen.path()), screen);
        }
        assert_eq!(Screen::from_path("/play-page"), Screen::Battle);
        assert_eq!(Screen::from_path("/select-buddy/"), Screen::SelectBuddy);
        assert_eq!(Screen::from_path("/nope"), Screen::NotFound);
    }

    #[test]
    fn screens_needing_a_buddy_redirect_without_one() {
        let store = GameStore::detached();
        assert_eq!(
            guard(Screen::RecordVoice, &store),
            GuardOutcome::Redirect {
                to: Screen::SelectBuddy,
                reason: GuardReason::NoBuddy
            }
        );
        assert_eq!(
            guard(Screen::Battle, &store),
            GuardOutcome::Redirect {
                to: Screen::Home,
                reason: GuardReason::NoBuddy
            }
        );
        assert_eq!(guard(Screen::SelectBuddy, &store), GuardOutcome::Allow);
        assert_eq!(guard(Screen::Home, &store), GuardOutcome::Allow);
    }

    #[test]
    fn buddy_unlocks_recording_and_battle() {
        let store = store_with_buddy();
        assert_eq!(guard(Screen::RecordVoice, &store), GuardOutcome::Allow);
        assert_eq!(guard(Screen::Battle, &store), GuardOutcome::Allow);
    }

    #[test]
    fn continue_requires_recording_before_battle() {
        let mut store = store_with_buddy();
        assert_eq!(advance(Screen::Home, &store), Ok(Screen::SelectBuddy));
        assert_eq!(advance(Screen::SelectBuddy, &store), Ok(Screen::RecordVoice));
        assert_eq!(
            advance(Screen::RecordVoice, &store),
            Err(GuardReason::NoRecording)
        );
        store.set_voice_recording("blob:voice");
        assert_eq!(advance(Screen::RecordVoice, &store), Ok(Screen::Battle));
        assert_eq!(
            advance(Screen::SelectBuddy, &GameStore::detached()),
            Err(GuardReason::NoBuddy)
        );
    }

    #[test]
    fn entering_home_restores_health_only() {
        let mut store = store_with_buddy();
        store.damage(100).unwrap();
        on_enter(Screen::Battle, &mut store);
        assert!(store.is_game_over());
        on_enter(Screen::Home, &mut store);
        assert_eq!(store.health(), store.max_health());
        assert!(store.buddy().is_some());
    }

    #[test]
    fn guard_messages_match_copy() {
        assert_eq!(GuardReason::NoBuddy.message(), "Please select a buddy first!");
        assert_eq!(
            GuardReason::NoRecording.message(),
            "Please record your voice first!"
        );
        assert_eq!(Screen::RecordVoice.back(), Screen::SelectBuddy);
    }
}
