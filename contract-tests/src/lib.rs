//! Contract tests for the hosted movies/reviews mock API.
//!
//! Scenarios live in the library so the same code runs against the hosted
//! service and against the in-process fake used by `cargo test`.
//!
//! ## Usage
//!
//! ```bash
//! # Scenarios against the in-process fake
//! cargo test -p contract-tests
//!
//! # Scenarios against the hosted API (CONTRACT_BASE_URL overrides the default)
//! cargo test -p contract-tests -- --ignored
//! ```

pub mod checks;
pub mod cleanup;
pub mod context;
pub mod outcome;
pub mod scenarios;

pub use cleanup::Cleanup;
pub use context::{ContractContext, DEFAULT_LOG_FILTER};
pub use harness_core::{Config, ContractError, FailureCategory, ResourceKind, Schema};
pub use outcome::{report, Outcome, ScenarioResult};

/// Returns true if SKIP_CONTRACT_TESTS is set.
pub fn should_skip() -> bool {
    std::env::var("SKIP_CONTRACT_TESTS").is_ok()
}
