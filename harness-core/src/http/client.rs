//! Thin HTTP adapter over `reqwest`.
//!
//! Every call has a bounded timeout and is attempted exactly once; tests
//! must fail fast and deterministically, so there is no retry layer here.

use crate::config::Config;
use crate::error::ContractError;
use crate::observability::REQUEST_ID_HEADER;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Status code plus raw body of a completed call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub method: Method,
    pub url: String,
    pub status: u16,
    pub body: String,
    pub request_id: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json(&self) -> Result<Value, ContractError> {
        serde_json::from_str(&self.body).map_err(|source| ContractError::Decode {
            url: self.url.clone(),
            source,
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ContractError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ContractError::Client)?;

        Ok(Self {
            client,
            timeout: config.request_timeout(),
        })
    }

    /// Issue one request and read the whole body.
    ///
    /// Non-2xx statuses are returned as responses, not errors; only
    /// transport problems produce `Err`.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ContractError> {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.classify(&method, url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify(&method, url, e))?;

        tracing::debug!(
            method = %method,
            url = %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            request_id = %request_id,
            "API call completed"
        );

        Ok(ApiResponse {
            method,
            url: url.to_string(),
            status,
            body,
            request_id,
        })
    }

    pub async fn get(&self, url: &str) -> Result<ApiResponse, ContractError> {
        self.request(Method::GET, url, None).await
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<ApiResponse, ContractError> {
        self.request(Method::POST, url, Some(body)).await
    }

    pub async fn put(&self, url: &str, body: &Value) -> Result<ApiResponse, ContractError> {
        self.request(Method::PUT, url, Some(body)).await
    }

    pub async fn delete(&self, url: &str) -> Result<ApiResponse, ContractError> {
        self.request(Method::DELETE, url, None).await
    }

    /// Single GET against the base URL. Any HTTP answer counts as reachable.
    pub async fn probe(&self, base_url: &str) -> Result<u16, ContractError> {
        match self.get(base_url).await {
            Ok(response) => Ok(response.status),
            Err(e) => Err(ContractError::Unreachable {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Callers decide how loudly a failure is reported; cleanup only warns.
    fn classify(&self, method: &Method, url: &str, err: reqwest::Error) -> ContractError {
        tracing::debug!(method = %method, url = %url, "API call failed: {}", err);
        if err.is_timeout() {
            ContractError::Timeout {
                method: method.to_string(),
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            ContractError::Transport {
                method: method.to_string(),
                url: url.to_string(),
                source: err,
            }
        }
    }
}
