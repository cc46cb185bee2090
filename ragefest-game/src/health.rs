//! Buddy health and the derived defeat state.
use crate::constants::{
    DEFAULT_MAX_HEALTH, HEALTHY_BAND_PCT, LABEL_ALMOST_DEFEATED, LABEL_DEFEATED, WOUNDED_BAND_PCT,
};
use crate::error::GameError;
use crate::numbers::percent_of;
use serde::{Deserialize, Serialize};

/// Where a session sits in the health state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthPhase {
    /// Full health: fresh session or just reset.
    Idle,
    /// Damaged but still standing.
    InProgress,
    /// Health reached zero. Left only through a reset.
    Defeated,
}

/// Coarse health band used to color the health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

/// Current and maximum health. `0 <= current <= maximum` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthState {
    current: u32,
    maximum: u32,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            current: DEFAULT_MAX_HEALTH,
            maximum: DEFAULT_MAX_HEALTH,
        }
    }
}

impl HealthState {
    /// Full health at `maximum`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidMaximumHealth`] when `maximum` is zero.
    pub fn new(maximum: u32) -> Result<Self, GameError> {
        if maximum == 0 {
            return Err(GameError::InvalidMaximumHealth);
        }
        Ok(Self {
            current: maximum,
            maximum,
        })
    }

    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub const fn phase(&self) -> HealthPhase {
        if self.current == 0 {
            HealthPhase::Defeated
        } else if self.current == self.maximum {
            HealthPhase::Idle
        } else {
            HealthPhase::InProgress
        }
    }

    /// Rounded percentage for display (bar width, `aria-valuenow`).
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent_of(self.current, self.maximum)
    }

    /// Exact `current / maximum > pct / 100`, without rounding.
    fn above_pct(&self, pct: u8) -> bool {
        u64::from(self.current) * 100 > u64::from(self.maximum) * u64::from(pct)
    }

    #[must_use]
    pub fn band(&self) -> HealthBand {
        if self.above_pct(HEALTHY_BAND_PCT) {
            HealthBand::Healthy
        } else if self.above_pct(WOUNDED_BAND_PCT) {
            HealthBand::Wounded
        } else {
            HealthBand::Critical
        }
    }

    /// Status text shown next to the health counter, if any.
    #[must_use]
    pub fn status_label(&self) -> Option<&'static str> {
        if self.is_game_over() {
            Some(LABEL_DEFEATED)
        } else if !self.above_pct(WOUNDED_BAND_PCT) {
            Some(LABEL_ALMOST_DEFEATED)
        } else {
            None
        }
    }

    /// Subtract `amount`, flooring at zero. Returns the damage actually dealt.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let next = self.current.saturating_sub(amount);
        let dealt = self.current - next;
        self.current = next;
        dealt
    }

    pub fn restore(&mut self) {
        self.current = self.maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_maximum_is_rejected() {
        assert_eq!(HealthState::new(0), Err(GameError::InvalidMaximumHealth));
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut health = HealthState::new(100).unwrap();
        assert_eq!(health.apply_damage(95), 95);
        assert_eq!(health.apply_damage(15), 5);
        assert_eq!(health.current(), 0);
        assert!(health.is_game_over());
        assert_eq!(health.phase(), HealthPhase::Defeated);
    }

    #[test]
    fn phases_follow_current() {
        let mut health = HealthState::default();
        assert_eq!(health.phase(), HealthPhase::Idle);
        health.apply_damage(1);
        assert_eq!(health.phase(), HealthPhase::InProgress);
        health.restore();
        assert_eq!(health.phase(), HealthPhase::Idle);
        assert_eq!(health.current(), health.maximum());
    }

    #[test]
    fn bands_and_labels_track_percentage() {
        let mut health = HealthState::new(200).unwrap();
        assert_eq!(health.band(), HealthBand::Healthy);
        assert_eq!(health.status_label(), None);
        health.apply_damage(80);
        assert_eq!(health.percent(), 60);
        assert_eq!(health.band(), HealthBand::Wounded);
        health.apply_damage(60);
        assert_eq!(health.percent(), 30);
        assert_eq!(health.band(), HealthBand::Critical);
        assert_eq!(health.status_label(), Some(LABEL_ALMOST_DEFEATED));
        health.apply_damage(60);
        assert_eq!(health.status_label(), Some(LABEL_DEFEATED));
    }

    #[test]
    fn bands_compare_the_exact_ratio() {
        let mut health = HealthState::new(1000).unwrap();
        health.apply_damage(396);
        assert_eq!(health.percent(), 60);
        assert_eq!(health.band(), HealthBand::Healthy);
        health.apply_damage(4);
        assert_eq!(health.band(), HealthBand::Wounded);

        health.apply_damage(296);
        assert_eq!(health.current(), 304);
        assert_eq!(health.percent(), 30);
        assert_eq!(health.band(), HealthBand::Wounded);
        assert_eq!(health.status_label(), None);
        health.apply_damage(4);
        assert_eq!(health.band(), HealthBand::Critical);
        assert_eq!(health.status_label(), Some(LABEL_ALMOST_DEFEATED));
    }
}
