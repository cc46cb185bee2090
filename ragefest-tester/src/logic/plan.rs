use anyhow::Result;
use ragefest_game::{GameSnapshot, GuardOutcome, Screen};
use std::sync::Arc;

/// One scripted interaction with the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    /// Pick a premade buddy by catalog id.
    PickBuddy(&'static str),
    /// Install an arbitrary selection.
    SetBuddy {
        id: &'static str,
        image: &'static str,
        label: &'static str,
    },
    /// Upload a buddy image; the runner mints a fresh local handle.
    UploadBuddy,
    /// Re-install whatever buddy is current.
    ReselectBuddy,
    /// Finish a take; the runner mints a fresh local handle.
    RecordVoice,
    /// Install a raw reference (blank clears).
    SetVoice(&'static str),
    ClearVoice,
    Damage(i32),
    Attack(&'static str),
    Reset,
    /// Arrive on a screen through the router guard.
    Visit(Screen),
    /// Press "Continue" on a screen.
    Continue(Screen),
    /// Seeded random actions, checking every invariant after each one.
    RandomWalk { steps: usize },
    EndSession,
}

impl SessionStep {
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::PickBuddy(id) => format!("pick {id}"),
            Self::SetBuddy { id, .. } => format!("set buddy {id}"),
            Self::UploadBuddy => "upload buddy".to_string(),
            Self::ReselectBuddy => "reselect buddy".to_string(),
            Self::RecordVoice => "record voice".to_string(),
            Self::SetVoice(reference) => format!("set voice `{reference}`"),
            Self::ClearVoice => "clear voice".to_string(),
            Self::Damage(amount) => format!("damage {amount}"),
            Self::Attack(id) => format!("attack {id}"),
            Self::Reset => "reset".to_string(),
            Self::Visit(screen) => format!("visit {}", screen.path()),
            Self::Continue(screen) => format!("continue from {}", screen.path()),
            Self::RandomWalk { steps } => format!("random walk x{steps}"),
            Self::EndSession => "end session".to_string(),
        }
    }
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Applied { changed: bool },
    Rejected(String),
    Routed(GuardOutcome),
    Advanced(Result<Screen, String>),
    Walked { actions: usize },
}

#[derive(Debug, Clone)]
pub struct StepRecord {
    pub label: String,
    pub outcome: StepOutcome,
    pub after: GameSnapshot,
}

/// Complete record of one plan execution.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub seed: u64,
    pub steps: Vec<StepRecord>,
    pub final_snapshot: GameSnapshot,
    /// Every local handle the runner created, in order.
    pub minted: Vec<String>,
    /// Every handle the store asked to release, in order.
    pub released: Vec<String>,
    pub defeats: usize,
    pub violations: Vec<String>,
    pub session_ended: bool,
}

impl SessionSummary {
    #[must_use]
    pub fn outcome_of(&self, index: usize) -> Option<&StepOutcome> {
        self.steps.get(index).map(|record| &record.outcome)
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<&StepOutcome> {
        self.steps.last().map(|record| &record.outcome)
    }
}

type SessionExpectationFn = Arc<dyn Fn(&SessionSummary) -> Result<()> + Send + Sync + 'static>;

/// Assertion hook run after a plan completes.
#[derive(Clone)]
pub struct SessionExpectation(SessionExpectationFn);

impl std::fmt::Debug for SessionExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionExpectation").finish()
    }
}

impl SessionExpectation {
    /// # Errors
    ///
    /// Returns the expectation's failure.
    pub fn evaluate(&self, summary: &SessionSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SessionExpectation
where
    F: Fn(&SessionSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Declarative plan for one session.
#[derive(Debug, Clone, Default)]
pub struct SessionPlan {
    pub max_health: Option<u32>,
    pub steps: Vec<SessionStep>,
    pub expectations: Vec<SessionExpectation>,
}

impl SessionPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = Some(max_health);
        self
    }

    #[must_use]
    pub fn step(mut self, step: SessionStep) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn steps(mut self, steps: impl IntoIterator<Item = SessionStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SessionExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}
