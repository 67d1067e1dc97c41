use harness_core::ContractError;

/// How a scenario ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// Nothing to exercise, e.g. an empty collection for a by-id lookup.
    Skipped(String),
    /// The backend accepted something it should have rejected; documented,
    /// not failed.
    Tolerated(String),
}

pub type ScenarioResult = Result<Outcome, ContractError>;

/// Log the outcome of `scenario` and panic on failure so the test runner
/// marks it failed. The panic message leads with the failure category.
pub fn report(scenario: &str, result: ScenarioResult) -> Outcome {
    match result {
        Ok(Outcome::Passed) => {
            tracing::info!(scenario, "passed");
            Outcome::Passed
        }
        Ok(Outcome::Skipped(reason)) => {
            tracing::info!(scenario, reason = %reason, "skipped");
            eprintln!("Skipping {}: {}", scenario, reason);
            Outcome::Skipped(reason)
        }
        Ok(Outcome::Tolerated(warning)) => {
            tracing::warn!(scenario, warning = %warning, "passed with tolerated deviation");
            Outcome::Tolerated(warning)
        }
        Err(e) => {
            tracing::error!(scenario, category = %e.category(), "failed: {}", e);
            panic!("[{}] {}: {}", e.category(), scenario, e);
        }
    }
}
