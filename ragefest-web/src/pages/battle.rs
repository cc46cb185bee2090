use crate::app::battle::BattleUi;
use crate::components::button::RageButton;
use crate::components::health_bar::HealthBar;
use crate::components::layout::Layout;
use crate::game::constants::LABEL_DEFEATED;
use crate::game::{AttackCatalog, BuddySelection, HealthState};
use crate::paths::media_src;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct BattlePageProps {
    /// `None` only during the grace period before the guard bounces home.
    #[prop_or_default]
    pub buddy: Option<BuddySelection>,
    pub health: HealthState,
    pub attacks: Rc<AttackCatalog>,
    pub ui: BattleUi,
    pub placeholder: AttrValue,
    pub on_attack: Callback<AttrValue>,
    pub on_play_again: Callback<()>,
    pub on_go_home: Callback<()>,
}

impl PartialEq for BattlePageProps {
    fn eq(&self, other: &Self) -> bool {
        self.buddy == other.buddy
            && self.health == other.health
            && Rc::ptr_eq(&self.attacks, &other.attacks)
            && self.ui == other.ui
            && self.placeholder == other.placeholder
    }
}

#[function_component(BattlePage)]
pub fn battle_page(props: &BattlePageProps) -> Html {
    let game_over = props.health.is_game_over();
    let locked = game_over || props.ui.is_animating();
    let onerror = {
        let placeholder = props.placeholder.clone();
        Callback::from(move |e: Event| {
            let img: web_sys::HtmlImageElement = e.target_unchecked_into();
            if img.src() != placeholder.as_str() {
                log::warn!(target: "ragefest::battle", "buddy image failed to load");
                img.set_src(&placeholder);
            }
        })
    };

    let buddy = props.buddy.as_ref().map_or_else(Html::default, |buddy| {
        html! {
            <img
                class={classes!("buddy-image", props.ui.is_animating().then_some("animate-shake"), game_over.then_some("opacity-50"))}
                src={media_src(buddy.image_reference())}
                alt={buddy.display_label().to_string()}
                {onerror}
            />
        }
    });
    let overlay = props.ui.overlay().map_or_else(Html::default, |effect| {
        let kind = props.ui.active_attack().unwrap_or("attack");
        html! {
            <div class={format!("{kind}-effect-container effect-overlay")}>
                <img class={format!("{kind}-effect")} src={media_src(effect)} alt={format!("{kind} effect")} />
            </div>
        }
    });

    html! {
        <Layout title="BEAT THE BUDDY">
            <section class="rage-card battle">
                <h3>{ "Buddy Health" }</h3>
                <HealthBar health={props.health} />
                <div class="buddy-container battle-stage">
                    { buddy }
                    { overlay }
                    if game_over && props.ui.victory_shown() {
                        <div class="victory-banner" role="alert">
                            <span class="text-rage-danger">{ LABEL_DEFEATED }</span>
                        </div>
                    }
                </div>
                <h3>{ "Attack Options" }</h3>
                <div class="attack-grid">
                    { for props.attacks.iter().map(|attack| {
                        let active = props.ui.active_attack() == Some(attack.id.as_str());
                        let onclick = {
                            let on_attack = props.on_attack.clone();
                            let id = AttrValue::from(attack.id.clone());
                            Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                e.stop_propagation();
                                on_attack.emit(id.clone());
                            })
                        };
                        html! {
                            <button
                                key={attack.id.clone()}
                                type="button"
                                class={classes!("attack-button", active.then_some("attack-active"))}
                                disabled={locked}
                                {onclick}
                            >
                                <span class="attack-label">{ attack.label.clone() }</span>
                                <span class="attack-damage">{ format!("-{}", attack.damage) }</span>
                            </button>
                        }
                    }) }
                </div>
                if game_over {
                    <div class="controls">
                        <RageButton label="Play Again" onclick={props.on_play_again.clone()} class="bg-green-600" />
                        <RageButton label="Go Home" onclick={props.on_go_home.clone()} class="bg-purple-600" />
                    </div>
                } else {
                    <div class="controls">
                        <RageButton label="Back to Home" outline=true onclick={props.on_go_home.clone()} />
                    </div>
                }
            </section>
        </Layout>
    }
}
