use ragefest_game::{
    BuddySelection, GameAction, GameError, GameStore, HealthPhase, MediaReleaser, NoopReleaser,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Clone, Default)]
struct ReleaseLog(Rc<RefCell<Vec<String>>>);

impl MediaReleaser for ReleaseLog {
    fn release(&self, handle: &str) {
        self.0.borrow_mut().push(handle.to_string());
    }
}

fn premade(n: u32) -> BuddySelection {
    BuddySelection::new(
        format!("buddy-{n}"),
        &format!("https://i.imgur.com/{n}.png"),
        format!("Buddy {n}"),
    )
    .unwrap()
}

#[test]
fn scenario_a_damage_accumulates() {
    let mut store = GameStore::detached();
    store.damage(15).unwrap();
    store.damage(15).unwrap();
    assert_eq!(store.health(), 70);
    assert!(!store.is_game_over());
}

#[test]
fn scenario_b_damage_floors_and_defeats() {
    let mut store = GameStore::detached();
    store.damage(95).unwrap();
    let outcome = store.damage(15).unwrap();
    assert_eq!(store.health(), 0);
    assert!(store.is_game_over());
    assert!(outcome.defeated);
    assert_eq!(store.phase(), HealthPhase::Defeated);
}

#[test]
fn scenario_c_reset_after_defeat() {
    let mut store = GameStore::detached();
    store.set_buddy(premade(1));
    store.damage(100).unwrap();
    assert!(store.is_game_over());
    store.reset();
    assert_eq!(store.health(), 100);
    assert!(!store.is_game_over());
    assert_eq!(store.buddy().map(BuddySelection::id), Some("buddy-1"));
}

#[test]
fn scenario_d_last_buddy_wins() {
    let mut store = GameStore::detached();
    store.set_buddy(premade(1));
    store.set_buddy(premade(2));
    assert_eq!(store.buddy().map(BuddySelection::id), Some("buddy-2"));
}

#[test]
fn scenario_e_empty_recording_clears() {
    let mut store = GameStore::detached();
    store.set_voice_recording("blob:http://localhost/voice");
    assert!(store.voice_recording().is_some());
    store.set_voice_recording("");
    assert!(store.voice_recording().is_none());
}

#[test]
fn damage_while_defeated_is_a_no_op() {
    let mut store = GameStore::detached();
    store.damage(100).unwrap();
    let revision = store.revision();
    let outcome = store.damage(10).unwrap();
    assert_eq!(outcome.dealt, 0);
    assert!(!outcome.defeated);
    assert_eq!(store.health(), 0);
    assert_eq!(store.revision(), revision);
}

#[test]
fn negative_damage_never_heals() {
    let mut store = GameStore::detached();
    store.damage(40).unwrap();
    let err = store.dispatch(GameAction::Damage(-25)).unwrap_err();
    assert_eq!(err, GameError::InvalidDamage { amount: -25 });
    assert_eq!(store.health(), 60);
}

#[test]
fn randomized_sessions_hold_every_invariant() {
    for seed in 0..32_u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let releases = ReleaseLog::default();
        let log = releases.0.clone();
        let max = rng.gen_range(1..=200);
        let mut store = GameStore::new(max, releases).unwrap();
        let mut minted: HashSet<String> = HashSet::new();

        for step in 0..200 {
            let before = store.health();
            let action = match rng.gen_range(0..6) {
                0 => {
                    let handle = format!("blob:img-{seed}-{step}");
                    minted.insert(handle.clone());
                    GameAction::SetBuddy(BuddySelection::new("uploaded", &handle, "Up").unwrap())
                }
                1 => GameAction::SetBuddy(premade(rng.gen_range(1..=3))),
                2 => {
                    let handle = format!("blob:voice-{seed}-{step}");
                    minted.insert(handle.clone());
                    GameAction::SetVoiceRecording(handle)
                }
                3 => GameAction::ClearVoiceRecording,
                4 => GameAction::Reset,
                _ => GameAction::Damage(rng.gen_range(-20..=60)),
            };
            let expected = action.clone();
            let result = store.dispatch(action);

            assert!(store.health() <= store.max_health());
            assert_eq!(store.is_game_over(), store.health() == 0);
            match expected {
                GameAction::Damage(amount) if amount < 0 => {
                    assert!(result.is_err());
                    assert_eq!(store.health(), before);
                }
                GameAction::Damage(amount) => {
                    let amount = u32::try_from(amount).unwrap();
                    assert_eq!(store.health(), before.saturating_sub(amount));
                }
                GameAction::Reset => assert_eq!(store.health(), store.max_health()),
                GameAction::SetBuddy(sel) => assert_eq!(store.buddy(), Some(&sel)),
                GameAction::SetVoiceRecording(r) => assert_eq!(
                    store.voice_recording().map(|v| v.audio_reference()),
                    Some(r.as_str())
                ),
                GameAction::ClearVoiceRecording => assert!(store.voice_recording().is_none()),
            }

            let released = log.borrow();
            let unique: HashSet<&String> = released.iter().collect();
            assert_eq!(unique.len(), released.len(), "a handle was released twice");
            assert!(released.iter().all(|h| minted.contains(h)));
            let live: Vec<&str> = [
                store.buddy().map(BuddySelection::image_reference),
                store.voice_recording().map(|v| v.audio_reference()),
            ]
            .into_iter()
            .flatten()
            .collect();
            assert!(live.iter().all(|h| !released.iter().any(|r| r == h)));
        }

        drop(store);
        let released = log.borrow();
        assert_eq!(released.len(), minted.len(), "seed {seed} leaked a handle");
    }
}

#[test]
fn independent_sessions_do_not_share_state() {
    let mut first = GameStore::new(100, NoopReleaser).unwrap();
    let second = GameStore::new(100, NoopReleaser).unwrap();
    first.set_buddy(premade(1));
    first.damage(50).unwrap();
    assert!(second.buddy().is_none());
    assert_eq!(second.health(), 100);
}
