use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use ragefest_game::{
    BuddySelection, ErrorKind, GameAction, GameContent, GameEngine, GameSnapshot, GameStore,
    GuardOutcome, MediaReleaser, Screen, UploadPolicy, advance, guard, on_enter,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use super::plan::{SessionPlan, SessionStep, SessionSummary, StepOutcome, StepRecord};

const LOG_TARGET: &str = "ragefest::tester";
const UPLOAD_MIME: &str = "image/png";

/// Releaser that remembers every handle it was asked to free.
#[derive(Debug, Clone, Default)]
pub struct ReleaseLog(Rc<RefCell<Vec<String>>>);

impl ReleaseLog {
    #[must_use]
    pub fn handles(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    fn contains(&self, handle: &str) -> bool {
        self.0.borrow().iter().any(|released| released == handle)
    }
}

impl MediaReleaser for ReleaseLog {
    fn release(&self, handle: &str) {
        self.0.borrow_mut().push(handle.to_string());
    }
}

type Store = GameStore<ReleaseLog>;

/// Per-run bookkeeping shared by every step.
struct RunState {
    seed: u64,
    rng: ChaCha20Rng,
    log: ReleaseLog,
    minted: Vec<String>,
    defeats: usize,
    violations: Vec<String>,
    last_revision: u64,
}

impl RunState {
    fn mint(&mut self, kind: &str) -> String {
        let handle = format!(
            "blob:ragefest-tester/{}/{kind}-{}",
            self.seed,
            self.minted.len() + 1
        );
        self.minted.push(handle.clone());
        handle
    }

    fn violation(&mut self, step: &str, message: impl Into<String>) {
        let message = format!("after `{step}`: {}", message.into());
        log::warn!(target: LOG_TARGET, "{message}");
        self.violations.push(message);
    }
}

/// Headless deterministic runner for session plans.
#[derive(Debug, Clone)]
pub struct SessionRunner {
    content: Arc<GameContent>,
    verbose: bool,
}

impl SessionRunner {
    #[must_use]
    pub const fn new(content: Arc<GameContent>, verbose: bool) -> Self {
        Self { content, verbose }
    }

    /// Runner over the bundled content.
    ///
    /// # Errors
    ///
    /// Returns an error when the bundled content fails to load or validate.
    pub fn from_bundled(verbose: bool) -> Result<Self> {
        let content = GameEngine::default()
            .content()
            .context("loading bundled session content")?;
        Ok(Self::new(Arc::new(content), verbose))
    }

    pub fn run_plan(&self, plan: &SessionPlan, seed: u64) -> SessionSummary {
        let releases = ReleaseLog::default();
        let mut run = RunState {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            log: releases.clone(),
            minted: Vec::new(),
            defeats: 0,
            violations: Vec::new(),
            last_revision: 0,
        };
        let mut store = self.open_store(plan, &mut run);
        let mut steps = Vec::with_capacity(plan.steps.len());

        for step in &plan.steps {
            let label = step.label();
            let outcome = self.apply(step, &mut store, &mut run);
            if self.verbose {
                println!("   ↳ {label}: {outcome:?} (health {})", store.health());
            }
            check_invariants(&store, &mut run, &label);
            steps.push(StepRecord {
                label,
                outcome,
                after: store.snapshot(),
            });
        }

        let final_snapshot = store.snapshot();
        drop(store);
        let released = releases.handles();
        let unreleased: Vec<&String> = run
            .minted
            .iter()
            .filter(|handle| !released.contains(*handle))
            .collect();
        if !unreleased.is_empty() {
            let message = format!("handles never released: {unreleased:?}");
            run.violation("session drop", message);
        }

        SessionSummary {
            seed,
            session_ended: plan.steps.contains(&SessionStep::EndSession),
            steps,
            final_snapshot,
            minted: run.minted,
            released,
            defeats: run.defeats,
            violations: run.violations,
        }
    }

    fn open_store(&self, plan: &SessionPlan, run: &mut RunState) -> Store {
        let opened = match plan.max_health {
            Some(max) => GameStore::new(max, run.log.clone()),
            None => GameStore::from_config(&self.content.config, run.log.clone()),
        };
        opened.unwrap_or_else(|err| {
            run.violation("open", err.to_string());
            GameStore::with_releaser(run.log.clone())
        })
    }

    fn apply(&self, step: &SessionStep, store: &mut Store, run: &mut RunState) -> StepOutcome {
        match step {
            SessionStep::PickBuddy(id) => self.pick_buddy(id, store),
            SessionStep::SetBuddy { id, image, label } => {
                match BuddySelection::new(*id, image, *label) {
                    Ok(selection) => dispatch(store, GameAction::SetBuddy(selection)),
                    Err(err) => StepOutcome::Rejected(err.to_string()),
                }
            }
            SessionStep::UploadBuddy => self.upload_buddy(store, run),
            SessionStep::ReselectBuddy => match store.buddy().cloned() {
                Some(current) => dispatch(store, GameAction::SetBuddy(current)),
                None => StepOutcome::Rejected("no buddy selected".to_string()),
            },
            SessionStep::RecordVoice => {
                let handle = run.mint("voice");
                dispatch(store, GameAction::SetVoiceRecording(handle))
            }
            SessionStep::SetVoice(reference) => {
                dispatch(store, GameAction::SetVoiceRecording((*reference).to_string()))
            }
            SessionStep::ClearVoice => dispatch(store, GameAction::ClearVoiceRecording),
            SessionStep::Damage(amount) => damage(store, run, *amount),
            SessionStep::Attack(id) => self.attack(id, store, run),
            SessionStep::Reset => dispatch(store, GameAction::Reset),
            SessionStep::Visit(screen) => visit(*screen, store),
            SessionStep::Continue(screen) => {
                StepOutcome::Advanced(advance(*screen, store).map_err(|r| r.message().to_string()))
            }
            SessionStep::RandomWalk { steps } => self.random_walk(*steps, store, run),
            SessionStep::EndSession => {
                let before = store.revision();
                store.end_session();
                StepOutcome::Applied {
                    changed: store.revision() != before,
                }
            }
        }
    }

    fn pick_buddy(&self, id: &str, store: &mut Store) -> StepOutcome {
        match self.content.buddies.selection(id) {
            Ok(selection) => dispatch(store, GameAction::SetBuddy(selection)),
            Err(err) => StepOutcome::Rejected(err.to_string()),
        }
    }

    fn upload_buddy(&self, store: &mut Store, run: &mut RunState) -> StepOutcome {
        let policy = UploadPolicy::new(self.content.config.upload_max_bytes);
        let size = run.rng.gen_range(1..=policy.max_bytes);
        if let Err(err) = policy.validate(size, UPLOAD_MIME) {
            return StepOutcome::Rejected(err.to_string());
        }
        let handle = run.mint("upload");
        match policy.uploaded_selection(&handle) {
            Ok(selection) => dispatch(store, GameAction::SetBuddy(selection)),
            Err(err) => StepOutcome::Rejected(err.to_string()),
        }
    }

    fn attack(&self, id: &str, store: &mut Store, run: &mut RunState) -> StepOutcome {
        let attack = match self.content.attacks.find(id) {
            Ok(attack) => attack.clone(),
            Err(err) => return StepOutcome::Rejected(err.to_string()),
        };
        let before = store.health();
        match store.attack(&attack) {
            Ok(outcome) => {
                if outcome.defeated {
                    run.defeats += 1;
                }
                StepOutcome::Applied {
                    changed: store.health() != before,
                }
            }
            Err(err) => StepOutcome::Rejected(err.to_string()),
        }
    }

    fn random_walk(&self, steps: usize, store: &mut Store, run: &mut RunState) -> StepOutcome {
        let buddy_ids: Vec<String> = self.content.buddies.iter().map(|b| b.id.clone()).collect();
        let attack_ids: Vec<String> = self.content.attacks.iter().map(|a| a.id.clone()).collect();

        for _ in 0..steps {
            let before = store.snapshot();
            let roll = run.rng.gen_range(0..10);
            let (label, outcome) = match roll {
                0 if !buddy_ids.is_empty() => {
                    let id = &buddy_ids[run.rng.gen_range(0..buddy_ids.len())];
                    (format!("pick {id}"), self.pick_buddy(id, store))
                }
                1 => ("upload buddy".to_string(), self.upload_buddy(store, run)),
                2 => {
                    let outcome = self.apply(&SessionStep::ReselectBuddy, store, run);
                    ("reselect buddy".to_string(), outcome)
                }
                3 => {
                    let outcome = self.apply(&SessionStep::RecordVoice, store, run);
                    ("record voice".to_string(), outcome)
                }
                4 => (
                    "clear voice".to_string(),
                    dispatch(store, GameAction::ClearVoiceRecording),
                ),
                5 | 6 => {
                    let amount = run.rng.gen_range(-5..=40);
                    (format!("damage {amount}"), damage(store, run, amount))
                }
                7 if !attack_ids.is_empty() => {
                    let id = &attack_ids[run.rng.gen_range(0..attack_ids.len())];
                    (format!("attack {id}"), self.attack(id, store, run))
                }
                8 => ("reset".to_string(), dispatch(store, GameAction::Reset)),
                _ => {
                    let screen = Screen::ALL[run.rng.gen_range(0..Screen::ALL.len())];
                    (format!("visit {}", screen.path()), visit(screen, store))
                }
            };
            check_transition(&before, store, &outcome, &label, run);
            check_invariants(store, run, &label);
        }
        StepOutcome::Walked { actions: steps }
    }
}

fn dispatch(store: &mut Store, action: GameAction) -> StepOutcome {
    match store.dispatch(action) {
        Ok(changed) => StepOutcome::Applied { changed },
        Err(err) => StepOutcome::Rejected(err.to_string()),
    }
}

fn damage(store: &mut Store, run: &mut RunState, amount: i32) -> StepOutcome {
    match store.damage(amount) {
        Ok(outcome) => {
            if outcome.defeated {
                run.defeats += 1;
            }
            StepOutcome::Applied {
                changed: outcome.dealt > 0,
            }
        }
        Err(err) => {
            if err.kind() != ErrorKind::InvalidArgument {
                let label = format!("damage {amount}");
                run.violation(&label, format!("unexpected error kind: {err}"));
            }
            StepOutcome::Rejected(err.to_string())
        }
    }
}

fn visit(screen: Screen, store: &mut Store) -> StepOutcome {
    let routed = guard(screen, store);
    if routed == GuardOutcome::Allow {
        on_enter(screen, store);
    }
    StepOutcome::Routed(routed)
}

/// Action-specific postconditions for a random step.
fn check_transition(
    before: &GameSnapshot,
    store: &Store,
    outcome: &StepOutcome,
    label: &str,
    run: &mut RunState,
) {
    if let Some(amount) = label.strip_prefix("damage ").and_then(|n| n.parse::<i32>().ok()) {
        match (amount, outcome) {
            (n, StepOutcome::Rejected(_)) if n < 0 => {
                if store.snapshot() != *before {
                    run.violation(label, "rejected damage changed the store");
                }
            }
            (n, StepOutcome::Applied { .. }) if n >= 0 => {
                let expected = before.health.saturating_sub(n.unsigned_abs());
                if store.health() != expected {
                    run.violation(
                        label,
                        format!("health {} expected {expected}", store.health()),
                    );
                }
            }
            _ => run.violation(label, format!("unexpected outcome {outcome:?}")),
        }
    } else if label == "reset" && store.health() != store.max_health() {
        run.violation(label, "reset did not restore full health");
    }
    if label != "reset"
        && !label.starts_with("visit")
        && before.buddy.is_some()
        && store.buddy().is_none()
    {
        run.violation(label, "buddy was lost");
    }
}

/// Properties that hold after every step.
fn check_invariants(store: &Store, run: &mut RunState, label: &str) {
    if store.health() > store.max_health() {
        let message = format!("health {} above max {}", store.health(), store.max_health());
        run.violation(label, message);
    }
    if store.is_game_over() != (store.health() == 0) {
        run.violation(label, "game-over flag disagrees with health");
    }
    if store.revision() < run.last_revision {
        run.violation(label, "revision went backwards");
    }
    run.last_revision = store.revision();

    let released = run.log.handles();
    let mut seen = HashSet::new();
    for handle in &released {
        if !seen.insert(handle.as_str()) {
            run.violation(label, format!("{handle} released twice"));
        }
        if !run.minted.contains(handle) {
            run.violation(label, format!("{handle} released but never minted"));
        }
    }
    let live = [
        store.buddy().map(|b| b.image_reference().to_string()),
        store
            .voice_recording()
            .map(|rec| rec.audio_reference().to_string()),
    ];
    for handle in live.into_iter().flatten() {
        if run.log.contains(&handle) {
            run.violation(label, format!("live handle {handle} was released"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> SessionRunner {
        SessionRunner::from_bundled(false).expect("bundled content")
    }

    #[test]
    fn scripted_round_defeats_and_releases_everything() {
        let plan = SessionPlan::new().steps([
            SessionStep::UploadBuddy,
            SessionStep::PickBuddy("buddy-3"),
            SessionStep::RecordVoice,
            SessionStep::RecordVoice,
            SessionStep::Attack("kick"),
            SessionStep::Damage(100),
            SessionStep::Reset,
        ]);
        let summary = runner().run_plan(&plan, 7);
        assert!(summary.violations.is_empty(), "{:?}", summary.violations);
        assert_eq!(summary.defeats, 1);
        assert_eq!(summary.final_snapshot.health, 100);
        assert_eq!(summary.minted.len(), 3);
        assert_eq!(summary.released.len(), 3);
        assert_eq!(summary.released[0], summary.minted[0]);
    }

    #[test]
    fn negative_damage_is_rejected() {
        let plan = SessionPlan::new().step(SessionStep::Damage(-5));
        let summary = runner().run_plan(&plan, 1);
        assert!(matches!(summary.last_outcome(), Some(StepOutcome::Rejected(_))));
        assert!(summary.violations.is_empty(), "{:?}", summary.violations);
        assert_eq!(summary.final_snapshot.health, 100);
    }

    #[test]
    fn random_walk_keeps_invariants() {
        let plan = SessionPlan::new().step(SessionStep::RandomWalk { steps: 150 });
        for seed in 0..8 {
            let summary = runner().run_plan(&plan, seed);
            assert!(summary.violations.is_empty(), "seed {seed}: {:?}", summary.violations);
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let plan = SessionPlan::new().step(SessionStep::RandomWalk { steps: 60 });
        let a = runner().run_plan(&plan, 99);
        let b = runner().run_plan(&plan, 99);
        assert_eq!(a.final_snapshot, b.final_snapshot);
        assert_eq!(a.released, b.released);
    }

    #[test]
    fn zero_health_plan_falls_back_and_reports() {
        let plan = SessionPlan::new().with_max_health(0);
        let summary = runner().run_plan(&plan, 1);
        assert_eq!(summary.final_snapshot.max_health, 100);
        assert_eq!(summary.violations.len(), 1);
    }
}
