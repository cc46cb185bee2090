pub mod plan;
pub mod reports;
pub mod seeds;
pub mod session_runner;
pub mod tester;

pub use plan::{SessionPlan, SessionStep, SessionSummary, StepOutcome};
pub use seeds::resolve_seeds;
pub use session_runner::SessionRunner;
pub use tester::*;
