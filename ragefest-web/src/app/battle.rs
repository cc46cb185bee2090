//! Screen-local animation state for the battle screen.
//!
//! None of this lives in the session store: it only gates the attack buttons
//! and decides which overlay is on screen.
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleUi {
    active_attack: Option<String>,
    overlay: Option<String>,
    victory_shown: bool,
}

impl BattleUi {
    /// Start an attack animation. Refused while one is running or the buddy
    /// is already defeated.
    pub fn begin(&mut self, attack_id: &str, effect: &str, is_game_over: bool) -> bool {
        if is_game_over || self.is_animating() {
            return false;
        }
        self.active_attack = Some(attack_id.to_string());
        self.overlay = (!effect.is_empty()).then(|| effect.to_string());
        true
    }

    /// Animation finished; buttons unlock.
    pub fn recover(&mut self) {
        self.active_attack = None;
        self.overlay = None;
    }

    pub fn show_victory(&mut self) {
        self.victory_shown = true;
    }

    /// Back to a clean screen for another round.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.active_attack.is_some()
    }

    #[must_use]
    pub fn active_attack(&self) -> Option<&str> {
        self.active_attack.as_deref()
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    #[must_use]
    pub const fn victory_shown(&self) -> bool {
        self.victory_shown
    }
}

pub enum BattleAction {
    Begin {
        attack_id: String,
        effect: String,
        is_game_over: bool,
    },
    Recover,
    ShowVictory,
    Reset,
}

impl Reducible for BattleUi {
    type Action = BattleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            BattleAction::Begin {
                attack_id,
                effect,
                is_game_over,
            } => next.begin(&attack_id, &effect, is_game_over),
            BattleAction::Recover => {
                next.recover();
                true
            }
            BattleAction::ShowVictory => {
                next.show_victory();
                true
            }
            BattleAction::Reset => {
                next.reset();
                true
            }
        };
        if changed && next != *self {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attacks_are_serialized() {
        let mut ui = BattleUi::default();
        assert!(ui.begin("punch", "static/img/effects/punch.png", false));
        assert!(ui.is_animating());
        assert!(!ui.begin("kick", "static/img/effects/kick.png", false));
        assert_eq!(ui.active_attack(), Some("punch"));
        ui.recover();
        assert!(ui.overlay().is_none());
        assert!(ui.begin("kick", "static/img/effects/kick.png", false));
        assert_eq!(ui.overlay(), Some("static/img/effects/kick.png"));
    }

    #[test]
    fn defeated_buddy_takes_no_more_attacks() {
        let mut ui = BattleUi::default();
        assert!(!ui.begin("punch", "", true));
        assert!(!ui.is_animating());
    }

    #[test]
    fn reset_clears_overlays_and_banner() {
        let mut ui = BattleUi::default();
        ui.begin("punch", "fx.png", false);
        ui.show_victory();
        ui.reset();
        assert_eq!(ui, BattleUi::default());
    }

    #[test]
    fn refused_begin_keeps_the_same_state() {
        let ui = Rc::new(BattleUi::default());
        let ui = ui.reduce(BattleAction::Begin {
            attack_id: "punch".to_string(),
            effect: String::new(),
            is_game_over: false,
        });
        let again = Rc::clone(&ui).reduce(BattleAction::Begin {
            attack_id: "kick".to_string(),
            effect: String::new(),
            is_game_over: false,
        });
        assert!(Rc::ptr_eq(&ui, &again));
        let ui = again.reduce(BattleAction::Recover);
        assert!(!ui.is_animating());
    }
}
