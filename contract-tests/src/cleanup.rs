//! Scoped cleanup of resources created during a scenario.
//!
//! Resources are deleted in reverse registration order, so a child
//! registered after its parent is removed first.

use harness_core::ApiClient;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct Cleanup {
    urls: Arc<Mutex<Vec<String>>>,
}

impl Cleanup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `url` for deletion when the scope ends.
    pub fn register(&self, url: impl Into<String>) {
        self.lock().push(url.into());
    }

    /// Forget `url`, typically because the scenario deleted it itself.
    /// Returns false if it was not registered.
    pub fn release(&self, url: &str) -> bool {
        let mut urls = self.lock();
        match urls.iter().rposition(|u| u == url) {
            Some(index) => {
                urls.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Delete everything still registered. Failures are logged and
    /// swallowed; the number of failed deletions is returned.
    pub async fn run(&self, client: &ApiClient) -> usize {
        let urls: Vec<String> = self.lock().drain(..).rev().collect();
        let mut failures = 0;

        for url in urls {
            match client.delete(&url).await {
                Ok(response) if response.is_success() || response.status == 404 => {
                    tracing::debug!(url = %url, status = response.status, "Cleaned up");
                }
                Ok(response) => {
                    failures += 1;
                    tracing::warn!(url = %url, status = response.status, "Cleanup delete rejected");
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!(url = %url, "Cleanup delete failed: {}", e);
                }
            }
        }

        failures
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.urls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
