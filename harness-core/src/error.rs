use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Coarse failure classes used when reporting a scenario.
///
/// `Assertion` means the API answered but behaved wrongly; `Transport`
/// means it could not be reached at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Assertion,
    Transport,
    Configuration,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureCategory::Assertion => "assertion",
            FailureCategory::Transport => "transport",
            FailureCategory::Configuration => "configuration",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} timed out after {timeout:?}")]
    Timeout {
        method: String,
        url: String,
        timeout: Duration,
    },

    #[error("Base URL {base_url} is unreachable: {reason}")]
    Unreachable { base_url: String, reason: String },

    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{scenario}: {expectation} (expected {expected}, got {actual})")]
    Assertion {
        scenario: String,
        expectation: String,
        expected: String,
        actual: String,
    },

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),

    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),
}

impl ContractError {
    pub fn assertion(
        scenario: impl Into<String>,
        expectation: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        ContractError::Assertion {
            scenario: scenario.into(),
            expectation: expectation.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            ContractError::Assertion { .. } | ContractError::Decode { .. } => {
                FailureCategory::Assertion
            }
            ContractError::Transport { .. }
            | ContractError::Timeout { .. }
            | ContractError::Unreachable { .. } => FailureCategory::Transport,
            ContractError::Config(_) | ContractError::Client(_) => FailureCategory::Configuration,
        }
    }
}

impl From<config::ConfigError> for ContractError {
    fn from(err: config::ConfigError) -> Self {
        ContractError::Config(anyhow::Error::new(err))
    }
}
