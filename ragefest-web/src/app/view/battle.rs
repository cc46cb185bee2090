use super::{ScreenProps, go_to};
use crate::app::battle::{BattleAction, BattleUi};
use crate::app::state::Session;
use crate::game::constants::{MSG_PLAY_AGAIN, MSG_VICTORY};
use crate::game::{GameAction, Screen};
use crate::media::{play_attack_sound, play_clip};
use crate::pages::battle::BattlePage;
use crate::toast::ToastKind;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

const LOG_TARGET: &str = "ragefest::battle";

type Timers = Rc<RefCell<Vec<Timeout>>>;

#[function_component(BattleScreen)]
pub fn battle_screen(props: &ScreenProps) -> Html {
    let session = props.session.clone();
    let ui = use_reducer(BattleUi::default);
    // Set between a click and the overlay clearing, ahead of the next render.
    let busy = use_mut_ref(|| false);
    let timers: Timers = use_mut_ref(Vec::new);

    {
        let timers = Rc::clone(&timers);
        use_effect_with((), move |_| move || timers.borrow_mut().clear());
    }

    let on_attack = {
        let session = session.clone();
        let ui = ui.clone();
        let busy = Rc::clone(&busy);
        let timers = Rc::clone(&timers);
        Callback::from(move |attack_id: AttrValue| {
            if *busy.borrow() || session.is_game_over() {
                return;
            }
            let Ok(attack) = session.attacks().find(&attack_id).cloned() else {
                log::warn!(target: LOG_TARGET, "no attack `{attack_id}`");
                return;
            };
            log::debug!(target: LOG_TARGET, "{} triggered", attack.id);
            *busy.borrow_mut() = true;
            timers.borrow_mut().clear();
            ui.dispatch(BattleAction::Begin {
                attack_id: attack.id.clone(),
                effect: attack.effect.clone(),
                is_game_over: false,
            });
            play_attack_sound(&attack, session.config().playback_volume);
            let landing = land_blow(&session, &ui, &busy, &timers, attack.id);
            timers
                .borrow_mut()
                .push(Timeout::new(session.config().attack_settle_ms, landing));
        })
    };

    let on_play_again = {
        let session = session.clone();
        let ui = ui.clone();
        let busy = Rc::clone(&busy);
        let timers = Rc::clone(&timers);
        Callback::from(move |()| {
            timers.borrow_mut().clear();
            *busy.borrow_mut() = false;
            session.dispatch(GameAction::Reset);
            ui.dispatch(BattleAction::Reset);
            session.notify(ToastKind::Info, MSG_PLAY_AGAIN);
        })
    };

    html! {
        <BattlePage
            buddy={session.buddy()}
            health={session.health()}
            attacks={session.attacks()}
            ui={(*ui).clone()}
            placeholder={AttrValue::from(session.config().placeholder_image.clone())}
            {on_attack}
            {on_play_again}
            on_go_home={go_to(&props.on_navigate, Screen::Home)}
        />
    }
}

/// Damage lands, then the overlay clears; a defeating blow also queues the
/// victory banner.
fn land_blow(
    session: &Session,
    ui: &UseReducerHandle<BattleUi>,
    busy: &Rc<RefCell<bool>>,
    timers: &Timers,
    attack_id: String,
) -> impl FnOnce() + 'static {
    let session = session.clone();
    let ui = ui.clone();
    let busy = Rc::clone(busy);
    let timers = Rc::clone(timers);
    move || {
        let config = session.config().clone();
        let defeated = session
            .attack(&attack_id)
            .is_some_and(|outcome| outcome.defeated);
        let recover = {
            let ui = ui.clone();
            let busy = Rc::clone(&busy);
            Timeout::new(config.attack_recover_ms, move || {
                *busy.borrow_mut() = false;
                ui.dispatch(BattleAction::Recover);
            })
        };
        timers.borrow_mut().push(recover);
        if defeated {
            log::info!(target: LOG_TARGET, "buddy defeated");
            play_clip(&config.defeat_sound, config.playback_volume);
            let victory = Timeout::new(config.victory_delay_ms, move || {
                ui.dispatch(BattleAction::ShowVictory);
                session.notify(ToastKind::Success, MSG_VICTORY);
            });
            timers.borrow_mut().push(victory);
        }
    }
}
