use crate::cleanup::Cleanup;
use futures::FutureExt;
use harness_core::observability::init_tracing;
use harness_core::{ApiClient, Config, ContractError, Endpoints, Schema};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Mutex;

pub const DEFAULT_LOG_FILTER: &str = "info,contract_tests=debug,harness_core=debug";

/// Probe results per base URL, shared by every test in the process.
static REACHABILITY: Lazy<Mutex<HashMap<String, Result<(), String>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Everything a scenario needs: configuration, endpoint URLs and a client.
///
/// Each test builds its own context. It holds no server-side resources;
/// anything a scenario creates is tied to a [`ContractContext::scoped`] block.
#[derive(Clone)]
pub struct ContractContext {
    pub config: Config,
    pub endpoints: Endpoints,
    pub client: ApiClient,
}

impl ContractContext {
    pub fn new(config: Config) -> Result<Self, ContractError> {
        init_tracing(DEFAULT_LOG_FILTER);
        config.validate()?;

        let client = ApiClient::new(&config)?;
        Ok(Self {
            endpoints: Endpoints::new(&config.base_url),
            config,
            client,
        })
    }

    /// Build a context and make sure the base URL answers.
    ///
    /// The probe runs once per base URL per process. An unreachable URL is
    /// logged the first time only; later calls fail fast with the cached
    /// reason.
    pub async fn connect(config: Config) -> Result<Self, ContractError> {
        let ctx = Self::new(config)?;
        ctx.ensure_reachable().await?;
        Ok(ctx)
    }

    /// [`ContractContext::connect`] with configuration from the environment.
    pub async fn from_env() -> Result<Self, ContractError> {
        Self::connect(Config::load()?).await
    }

    pub fn schema(&self) -> &Schema {
        &self.config.schema
    }

    async fn ensure_reachable(&self) -> Result<(), ContractError> {
        let base_url = self.endpoints.base.clone();

        let cached = lock_reachability().get(&base_url).cloned();
        let outcome = match cached {
            Some(outcome) => outcome,
            None => {
                let outcome = match self.client.probe(&base_url).await {
                    Ok(status) => {
                        tracing::info!(base_url = %base_url, status, "Mock API reachable");
                        Ok(())
                    }
                    Err(e) => Err(e.to_string()),
                };

                let first = lock_reachability()
                    .insert(base_url.clone(), outcome.clone())
                    .is_none();
                if first {
                    if let Err(reason) = &outcome {
                        tracing::error!(base_url = %base_url, "Mock API unreachable: {}", reason);
                    }
                }
                outcome
            }
        };

        outcome.map_err(|reason| ContractError::Unreachable { base_url, reason })
    }

    /// Run `body` with a fresh [`Cleanup`] and delete whatever it registered
    /// once the body finishes, whether it returned `Ok`, `Err` or panicked.
    ///
    /// Cleanup failures are logged and never replace the body's result.
    pub async fn scoped<F, Fut, T>(&self, body: F) -> Result<T, ContractError>
    where
        F: FnOnce(Cleanup) -> Fut,
        Fut: Future<Output = Result<T, ContractError>>,
    {
        let cleanup = Cleanup::new();
        let result = AssertUnwindSafe(body(cleanup.clone())).catch_unwind().await;

        let failures = cleanup.run(&self.client).await;
        if failures > 0 {
            tracing::warn!(failures, "Some created resources could not be cleaned up");
        }

        match result {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

fn lock_reachability() -> std::sync::MutexGuard<'static, HashMap<String, Result<(), String>>> {
    REACHABILITY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
