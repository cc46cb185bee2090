//! Seeded random walks. The runner checks the health, defeat-flag, revision
//! and handle-ownership properties after every action; these plans only add
//! end-of-session checks.
use anyhow::{Result, ensure};

use super::TestScenario;
use crate::logic::{SessionPlan, SessionStep, SessionSummary};

const SWEEP_STEPS: usize = 200;
const CUSTOM_MAX_HEALTH: u32 = 37;

fn everything_released(summary: &SessionSummary) -> Result<()> {
    ensure!(summary.session_ended, "the plan ends the session");
    let mut released = summary.released.clone();
    let mut minted = summary.minted.clone();
    released.sort();
    minted.sort();
    ensure!(
        released == minted,
        "{} handles minted but {} released",
        minted.len(),
        released.len()
    );
    Ok(())
}

pub fn random_sweep() -> TestScenario {
    TestScenario::new(
        "Randomized Invariant Sweep",
        SessionPlan::new()
            .steps([
                SessionStep::RandomWalk { steps: SWEEP_STEPS },
                SessionStep::EndSession,
            ])
            .with_expectation(everything_released),
    )
}

pub fn custom_health_sweep() -> TestScenario {
    TestScenario::new(
        "Randomized Sweep With Custom Maximum",
        SessionPlan::new()
            .with_max_health(CUSTOM_MAX_HEALTH)
            .steps([
                SessionStep::RandomWalk { steps: SWEEP_STEPS },
                SessionStep::Reset,
                SessionStep::EndSession,
            ])
            .with_expectation(everything_released)
            .with_expectation(|summary: &SessionSummary| {
                let snapshot = &summary.final_snapshot;
                ensure!(
                    snapshot.max_health == CUSTOM_MAX_HEALTH,
                    "maximum changed to {}",
                    snapshot.max_health
                );
                ensure!(snapshot.health == CUSTOM_MAX_HEALTH, "final reset restores the maximum");
                Ok(())
            }),
    )
}
