use futures::executor::block_on;
use ragefest_web::app::battle::BattleUi;
use ragefest_web::game::{
    AttackCatalog, BuddyCatalog, BuddySelection, HealthState, RecordingClock,
};
use ragefest_web::pages::{
    battle::{BattlePage, BattlePageProps},
    home::{HomePage, HomePageProps},
    not_found::{NotFound, Props as NotFoundProps},
    record_voice::{CapturePhase, RecordVoicePage, RecordVoicePageProps},
    select_buddy::{SelectBuddyPage, SelectBuddyPageProps},
};
use std::rc::Rc;
use yew::{AttrValue, Callback, LocalServerRenderer};

const PLACEHOLDER: &str = "https://placehold.co/300x300/FF6B6B/ffffff?text=Buddy";

fn stickman() -> BuddySelection {
    BuddySelection::new("buddy-1", "https://i.imgur.com/S2P0KqD.png", "Stickman Buddy")
        .expect("valid selection")
}

fn record_props(phase: CapturePhase, clock: RecordingClock) -> RecordVoicePageProps {
    RecordVoicePageProps {
        buddy: stickman(),
        placeholder: PLACEHOLDER.into(),
        clock,
        phase,
        is_playing: false,
        on_start: Callback::noop(),
        on_stop: Callback::noop(),
        on_play: Callback::noop(),
        on_record_again: Callback::noop(),
        on_back: Callback::noop(),
        on_continue: Callback::noop(),
    }
}

fn battle_props(health: HealthState, ui: BattleUi) -> BattlePageProps {
    BattlePageProps {
        buddy: Some(stickman()),
        health,
        attacks: Rc::new(AttackCatalog::load_from_static()),
        ui,
        placeholder: PLACEHOLDER.into(),
        on_attack: Callback::noop(),
        on_play_again: Callback::noop(),
        on_go_home: Callback::noop(),
    }
}

#[test]
fn home_page_renders_title_and_begin() {
    let props = HomePageProps {
        on_begin: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("BUDDY BEAT"));
    assert!(html.contains("RAGE FEST"));
    assert!(html.contains("BEGIN RAGE"));
}

#[test]
fn select_buddy_page_lists_premade_buddies() {
    let props = SelectBuddyPageProps {
        buddies: Rc::new(BuddyCatalog::load_from_static()),
        selected_id: Some(AttrValue::from("buddy-2")),
        uploaded_src: None,
        upload_limit_bytes: 5_000_000,
        on_pick: Callback::noop(),
        on_upload: Callback::noop(),
        on_back: Callback::noop(),
        on_continue: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SelectBuddyPage>::with_props(props).render());
    assert!(html.contains("SELECT YOUR BUDDY"));
    assert!(html.contains("Max size: 5MB"));
    assert!(html.contains("Stickman Buddy"));
    assert!(html.contains("Paper Buddy"));
    assert_eq!(html.matches("ring-rage").count(), 1);
    assert!(!html.contains("upload-preview"));
}

#[test]
fn select_buddy_page_previews_pending_upload() {
    let props = SelectBuddyPageProps {
        buddies: Rc::new(BuddyCatalog::empty()),
        selected_id: Some(AttrValue::from("uploaded")),
        uploaded_src: Some(AttrValue::from("blob:http://localhost/upload-1")),
        upload_limit_bytes: 5_000_000,
        on_pick: Callback::noop(),
        on_upload: Callback::noop(),
        on_back: Callback::noop(),
        on_continue: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SelectBuddyPage>::with_props(props).render());
    assert!(html.contains("upload-preview"));
    assert!(html.contains("blob:http://localhost/upload-1"));
    assert!(html.contains("Uploaded Buddy"));
}

#[test]
fn record_voice_page_shows_timer_and_phase_controls() {
    let mut clock = RecordingClock::new(30);
    clock.tick();
    clock.tick();
    let html = block_on(
        LocalServerRenderer::<RecordVoicePage>::with_props(record_props(
            CapturePhase::Recording,
            clock,
        ))
        .render(),
    );
    assert!(html.contains("RECORD YOUR RAGE"));
    assert!(html.contains("2s / 30s"));
    assert!(html.contains("Stop Recording"));
    assert!(html.contains("Stickman Buddy"));

    let html = block_on(
        LocalServerRenderer::<RecordVoicePage>::with_props(record_props(
            CapturePhase::Recorded,
            RecordingClock::new(30),
        ))
        .render(),
    );
    assert!(html.contains("Play Recording"));
    assert!(html.contains("Record Again"));
    assert!(!html.contains("Start Recording"));
}

#[test]
fn battle_page_renders_attacks_and_health() {
    let health = HealthState::new(100).expect("positive maximum");
    let html = block_on(
        LocalServerRenderer::<BattlePage>::with_props(battle_props(health, BattleUi::default()))
            .render(),
    );
    assert!(html.contains("BEAT THE BUDDY"));
    assert!(html.contains("100 / 100"));
    assert!(html.contains("Punch"));
    assert!(html.contains("-15"));
    assert!(html.contains("Back to Home"));
    assert!(!html.contains("Play Again"));
}

#[test]
fn battle_page_shows_overlay_while_attack_lands() {
    let mut ui = BattleUi::default();
    assert!(ui.begin("kick", "static/img/effects/kick.png", false));
    let health = HealthState::new(100).expect("positive maximum");
    let html =
        block_on(LocalServerRenderer::<BattlePage>::with_props(battle_props(health, ui)).render());
    assert!(html.contains("kick-effect-container"));
    assert!(html.contains("attack-active"));
    assert!(html.contains("animate-shake"));
}

#[test]
fn battle_page_shows_victory_after_defeat() {
    let mut health = HealthState::new(100).expect("positive maximum");
    health.apply_damage(100);
    let mut ui = BattleUi::default();
    ui.show_victory();
    let html =
        block_on(LocalServerRenderer::<BattlePage>::with_props(battle_props(health, ui)).render());
    assert!(html.contains("DEFEATED!"));
    assert!(html.contains("Play Again"));
    assert!(html.contains("Go Home"));
    assert!(html.contains("0 / 100"));
}

#[test]
fn not_found_page_renders_message() {
    let props = NotFoundProps {
        path: "/nowhere".into(),
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("404"));
    assert!(html.contains("Buddy Not Found!"));
    assert!(html.contains("Return to Home"));
}
