use crate::logic::SessionPlan;

pub mod catalog;
pub mod sweep;

/// A named session plan.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: SessionPlan,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, plan: SessionPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

/// Keys run by `--scenarios all`, in execution order.
pub const ALL_SCENARIO_KEYS: &[&str] = &[
    "smoke",
    "full-round",
    "damage-basic",
    "damage-floor",
    "reset-after-defeat",
    "last-write-wins",
    "zero-damage",
    "negative-damage",
    "handle-release",
    "navigation-guards",
    "random-sweep",
    "custom-health-sweep",
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(catalog::smoke()),
        "full-round" | "full" => Some(catalog::full_round()),
        "damage-basic" | "scenario-a" => Some(catalog::damage_basic()),
        "damage-floor" | "scenario-b" => Some(catalog::damage_floor()),
        "reset-after-defeat" | "scenario-c" => Some(catalog::reset_after_defeat()),
        "last-write-wins" | "scenario-d" => Some(catalog::last_write_wins()),
        "zero-damage" | "scenario-e" => Some(catalog::zero_damage()),
        "negative-damage" => Some(catalog::negative_damage()),
        "handle-release" | "handles" => Some(catalog::handle_release()),
        "navigation-guards" | "navigation" => Some(catalog::navigation_guards()),
        "random-sweep" | "sweep" => Some(sweep::random_sweep()),
        "custom-health-sweep" => Some(sweep::custom_health_sweep()),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("full-round", "Full Session Round"),
        ("damage-basic", "Damage From Full Health"),
        ("damage-floor", "Damage Floors At Zero"),
        ("reset-after-defeat", "Reset After Defeat"),
        ("last-write-wins", "Buddy Last Write Wins"),
        ("zero-damage", "Zero Damage Is A No-Op"),
        ("negative-damage", "Negative Damage Rejected"),
        ("handle-release", "Local Handle Release"),
        ("navigation-guards", "Navigation Guards"),
        ("random-sweep", "Randomized Invariant Sweep"),
        ("custom-health-sweep", "Randomized Sweep With Custom Maximum"),
    ]
}
