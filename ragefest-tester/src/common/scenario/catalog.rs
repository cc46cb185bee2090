//! Scripted session plans with fixed expectations.
use anyhow::{Result, ensure};
use ragefest_game::constants::{MSG_RECORD_FIRST, MSG_SELECT_BUDDY_FIRST};
use ragefest_game::{GameSnapshot, GuardOutcome, GuardReason, HealthPhase, Screen};

use super::TestScenario;
use crate::logic::{SessionPlan, SessionStep, SessionSummary, StepOutcome};

fn expect_outcome(summary: &SessionSummary, index: usize, expected: &StepOutcome) -> Result<()> {
    let actual = summary.outcome_of(index);
    ensure!(
        actual == Some(expected),
        "step {index} expected {expected:?}, got {actual:?}"
    );
    Ok(())
}

fn after(summary: &SessionSummary, index: usize) -> Result<&GameSnapshot> {
    summary
        .steps
        .get(index)
        .map(|record| &record.after)
        .ok_or_else(|| anyhow::anyhow!("step {index} was not recorded"))
}

pub fn smoke() -> TestScenario {
    TestScenario::new(
        "Smoke Test",
        SessionPlan::new()
            .steps([
                SessionStep::PickBuddy("buddy-1"),
                SessionStep::RecordVoice,
                SessionStep::Attack("punch"),
            ])
            .with_expectation(|summary: &SessionSummary| {
                let snapshot = &summary.final_snapshot;
                ensure!(snapshot.health == 90, "punch should leave 90, got {}", snapshot.health);
                ensure!(!snapshot.is_game_over, "one punch must not defeat the buddy");
                ensure!(snapshot.voice_recording.is_some(), "recording should be kept");
                Ok(())
            }),
    )
}

pub fn full_round() -> TestScenario {
    let mut plan = SessionPlan::new().steps([
        SessionStep::Visit(Screen::Home),
        SessionStep::Continue(Screen::Home),
        SessionStep::Visit(Screen::SelectBuddy),
        SessionStep::Continue(Screen::SelectBuddy),
        SessionStep::UploadBuddy,
        SessionStep::PickBuddy("buddy-2"),
        SessionStep::Continue(Screen::SelectBuddy),
        SessionStep::Visit(Screen::RecordVoice),
        SessionStep::Continue(Screen::RecordVoice),
        SessionStep::RecordVoice,
        SessionStep::Continue(Screen::RecordVoice),
        SessionStep::Visit(Screen::Battle),
    ]);
    plan = plan.steps(std::iter::repeat_n(SessionStep::Attack("kick"), 6));
    plan = plan.steps([
        SessionStep::Attack("punch"),
        SessionStep::Attack("punch"),
        SessionStep::Reset,
        SessionStep::Visit(Screen::Home),
    ]);

    TestScenario::new("Full Session Round", plan.with_expectation(full_round_expectation))
}

fn full_round_expectation(summary: &SessionSummary) -> Result<()> {
    expect_outcome(summary, 1, &StepOutcome::Advanced(Ok(Screen::SelectBuddy)))?;
    expect_outcome(
        summary,
        3,
        &StepOutcome::Advanced(Err(MSG_SELECT_BUDDY_FIRST.to_string())),
    )?;
    expect_outcome(summary, 6, &StepOutcome::Advanced(Ok(Screen::RecordVoice)))?;
    expect_outcome(
        summary,
        8,
        &StepOutcome::Advanced(Err(MSG_RECORD_FIRST.to_string())),
    )?;
    expect_outcome(summary, 10, &StepOutcome::Advanced(Ok(Screen::Battle)))?;
    expect_outcome(summary, 11, &StepOutcome::Routed(GuardOutcome::Allow))?;

    ensure!(after(summary, 17)?.health == 10, "six kicks should leave 10");
    ensure!(after(summary, 18)?.health == 0, "the final punch should defeat");
    expect_outcome(summary, 19, &StepOutcome::Applied { changed: false })?;
    ensure!(summary.defeats == 1, "expected one defeat, saw {}", summary.defeats);

    let snapshot = &summary.final_snapshot;
    ensure!(snapshot.health == snapshot.max_health, "reset restores full health");
    ensure!(snapshot.phase == HealthPhase::Idle, "round should be idle again");
    ensure!(
        snapshot.buddy.as_ref().map(|b| b.id()) == Some("buddy-2"),
        "reset keeps the buddy"
    );
    ensure!(snapshot.voice_recording.is_some(), "reset keeps the recording");
    ensure!(
        summary.released.first() == summary.minted.first(),
        "replacing the upload releases its handle"
    );
    Ok(())
}

pub fn damage_basic() -> TestScenario {
    TestScenario::new(
        "Damage From Full Health",
        SessionPlan::new()
            .with_max_health(100)
            .step(SessionStep::Damage(10))
            .with_expectation(|summary: &SessionSummary| {
                ensure!(summary.final_snapshot.health == 90, "100 - 10 should be 90");
                ensure!(!summary.final_snapshot.is_game_over, "90 is not game over");
                Ok(())
            }),
    )
}

pub fn damage_floor() -> TestScenario {
    TestScenario::new(
        "Damage Floors At Zero",
        SessionPlan::new()
            .with_max_health(100)
            .steps([SessionStep::Damage(95), SessionStep::Damage(15)])
            .with_expectation(|summary: &SessionSummary| {
                ensure!(after(summary, 0)?.health == 5, "setup should leave 5");
                ensure!(summary.final_snapshot.health == 0, "health floors at zero");
                ensure!(summary.final_snapshot.is_game_over, "zero health is game over");
                ensure!(summary.defeats == 1, "defeat is reported once");
                Ok(())
            }),
    )
}

pub fn reset_after_defeat() -> TestScenario {
    TestScenario::new(
        "Reset After Defeat",
        SessionPlan::new()
            .with_max_health(100)
            .steps([SessionStep::Damage(100), SessionStep::Reset])
            .with_expectation(|summary: &SessionSummary| {
                ensure!(after(summary, 0)?.health == 0, "setup should defeat");
                let snapshot = &summary.final_snapshot;
                ensure!(snapshot.health == 100, "reset restores the maximum");
                ensure!(!snapshot.is_game_over, "reset clears game over");
                ensure!(snapshot.phase == HealthPhase::Idle, "reset returns to idle");
                Ok(())
            }),
    )
}

pub fn last_write_wins() -> TestScenario {
    TestScenario::new(
        "Buddy Last Write Wins",
        SessionPlan::new()
            .steps([
                SessionStep::SetBuddy {
                    id: "b1",
                    image: "https://x/a.png",
                    label: "A",
                },
                SessionStep::SetBuddy {
                    id: "b2",
                    image: "https://x/b.png",
                    label: "B",
                },
            ])
            .with_expectation(|summary: &SessionSummary| {
                let buddy = summary.final_snapshot.buddy.as_ref();
                ensure!(buddy.map(|b| b.id()) == Some("b2"), "second write wins");
                ensure!(
                    buddy.map(|b| b.image_reference()) == Some("https://x/b.png"),
                    "image follows the selection"
                );
                ensure!(summary.released.is_empty(), "remote images are never released");
                Ok(())
            }),
    )
}

pub fn zero_damage() -> TestScenario {
    TestScenario::new(
        "Zero Damage Is A No-Op",
        SessionPlan::new()
            .steps([SessionStep::Damage(10), SessionStep::Damage(0)])
            .with_expectation(|summary: &SessionSummary| {
                expect_outcome(summary, 1, &StepOutcome::Applied { changed: false })?;
                let (first, second) = (after(summary, 0)?, after(summary, 1)?);
                ensure!(first.health == second.health, "zero damage keeps health");
                ensure!(first.revision == second.revision, "zero damage is not a change");
                Ok(())
            }),
    )
}

pub fn negative_damage() -> TestScenario {
    TestScenario::new(
        "Negative Damage Rejected",
        SessionPlan::new()
            .steps([SessionStep::Damage(20), SessionStep::Damage(-5)])
            .with_expectation(|summary: &SessionSummary| {
                ensure!(
                    matches!(summary.outcome_of(1), Some(StepOutcome::Rejected(_))),
                    "negative damage must be rejected"
                );
                ensure!(summary.final_snapshot.health == 80, "rejected damage changes nothing");
                Ok(())
            }),
    )
}

pub fn handle_release() -> TestScenario {
    TestScenario::new(
        "Local Handle Release",
        SessionPlan::new()
            .steps([
                SessionStep::UploadBuddy,
                SessionStep::ReselectBuddy,
                SessionStep::RecordVoice,
                SessionStep::RecordVoice,
                SessionStep::SetVoice(""),
                SessionStep::PickBuddy("buddy-3"),
                SessionStep::RecordVoice,
                SessionStep::EndSession,
            ])
            .with_expectation(handle_release_expectation),
    )
}

fn handle_release_expectation(summary: &SessionSummary) -> Result<()> {
    expect_outcome(summary, 1, &StepOutcome::Applied { changed: false })?;
    ensure!(summary.minted.len() == 4, "four local handles were created");
    let (upload, first_take, second_take, third_take) = (
        &summary.minted[0],
        &summary.minted[1],
        &summary.minted[2],
        &summary.minted[3],
    );
    let expected = vec![
        first_take.clone(),
        second_take.clone(),
        upload.clone(),
        third_take.clone(),
    ];
    ensure!(
        summary.released == expected,
        "release order {:?} expected {expected:?}",
        summary.released
    );
    ensure!(summary.session_ended, "session should have ended");
    ensure!(summary.final_snapshot.buddy.is_none(), "ending forgets the buddy");
    ensure!(
        summary.final_snapshot.voice_recording.is_none(),
        "ending forgets the recording"
    );
    Ok(())
}

pub fn navigation_guards() -> TestScenario {
    TestScenario::new(
        "Navigation Guards",
        SessionPlan::new()
            .steps([
                SessionStep::Visit(Screen::RecordVoice),
                SessionStep::Visit(Screen::Battle),
                SessionStep::Continue(Screen::SelectBuddy),
                SessionStep::Continue(Screen::Home),
                SessionStep::PickBuddy("buddy-1"),
                SessionStep::Visit(Screen::RecordVoice),
                SessionStep::Visit(Screen::Battle),
                SessionStep::Damage(40),
                SessionStep::Visit(Screen::Home),
            ])
            .with_expectation(navigation_expectation),
    )
}

fn navigation_expectation(summary: &SessionSummary) -> Result<()> {
    expect_outcome(
        summary,
        0,
        &StepOutcome::Routed(GuardOutcome::Redirect {
            to: Screen::SelectBuddy,
            reason: GuardReason::NoBuddy,
        }),
    )?;
    expect_outcome(
        summary,
        1,
        &StepOutcome::Routed(GuardOutcome::Redirect {
            to: Screen::Home,
            reason: GuardReason::NoBuddy,
        }),
    )?;
    expect_outcome(
        summary,
        2,
        &StepOutcome::Advanced(Err(MSG_SELECT_BUDDY_FIRST.to_string())),
    )?;
    expect_outcome(summary, 3, &StepOutcome::Advanced(Ok(Screen::SelectBuddy)))?;
    expect_outcome(summary, 5, &StepOutcome::Routed(GuardOutcome::Allow))?;
    expect_outcome(summary, 6, &StepOutcome::Routed(GuardOutcome::Allow))?;
    ensure!(after(summary, 7)?.health == 60, "damage lands before going home");
    ensure!(summary.final_snapshot.health == 100, "entering home resets health");
    ensure!(summary.final_snapshot.buddy.is_some(), "going home keeps the buddy");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::SessionRunner;

    fn run(scenario: &TestScenario, seed: u64) -> Result<SessionSummary> {
        let runner = SessionRunner::from_bundled(false)?;
        let summary = runner.run_plan(&scenario.plan, seed);
        ensure!(summary.violations.is_empty(), "{:?}", summary.violations);
        for expectation in &scenario.plan.expectations {
            expectation.evaluate(&summary)?;
        }
        Ok(summary)
    }

    #[test]
    fn scripted_scenarios_pass() {
        for scenario in [
            smoke(),
            full_round(),
            damage_basic(),
            damage_floor(),
            reset_after_defeat(),
            last_write_wins(),
            zero_damage(),
            negative_damage(),
            handle_release(),
            navigation_guards(),
        ] {
            if let Err(err) = run(&scenario, 1337) {
                panic!("{} failed: {err:#}", scenario.name);
            }
        }
    }

    #[test]
    fn broken_expectation_surfaces() {
        let scenario = TestScenario::new(
            "Wrong",
            SessionPlan::new()
                .step(SessionStep::Damage(10))
                .with_expectation(|summary: &SessionSummary| {
                    expect_outcome(summary, 0, &StepOutcome::Applied { changed: false })
                }),
        );
        let err = run(&scenario, 1).unwrap_err();
        assert!(err.to_string().contains("step 0 expected"));
    }
}
