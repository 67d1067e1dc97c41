//! Contract scenarios, each independent and responsible for its own data.

pub mod integration;
pub mod lifecycle;
pub mod validation;

use crate::checks::{expect_id, expect_status};
use crate::cleanup::Cleanup;
use crate::context::ContractContext;
use harness_core::schema::record_id;
use harness_core::{ContractError, ResourceKind};
use serde_json::Value;

/// A record the scenario created and registered for cleanup.
#[derive(Debug, Clone)]
pub struct Created {
    pub id: String,
    pub url: String,
    pub record: Value,
}

/// POST `payload` to the collection of `kind`, expecting 201.
///
/// The new record is registered with `cleanup` as soon as an id is visible,
/// before the status is checked, so a misreported status cannot leak data.
pub async fn create_record(
    ctx: &ContractContext,
    cleanup: &Cleanup,
    scenario: &str,
    kind: ResourceKind,
    payload: &Value,
) -> Result<Created, ContractError> {
    let response = ctx
        .client
        .post(ctx.endpoints.collection(kind), payload)
        .await?;

    let record = response.json().ok();
    if response.is_success() {
        if let Some(id) = record.as_ref().and_then(record_id) {
            cleanup.register(ctx.endpoints.item(kind, &id));
        }
    }

    expect_status(scenario, &response, 201)?;
    let record = response.json()?;
    let id = expect_id(scenario, &record)?;
    tracing::debug!(scenario, kind = %kind, id = %id, "Created {}", kind.label());

    Ok(Created {
        url: ctx.endpoints.item(kind, &id),
        id,
        record,
    })
}

/// GET a single record, expecting 200, and return its body.
pub async fn fetch_record(
    ctx: &ContractContext,
    scenario: &str,
    url: &str,
) -> Result<Value, ContractError> {
    let response = ctx.client.get(url).await?;
    expect_status(scenario, &response, 200)?;
    response.json()
}

/// DELETE a record the scenario owns, expecting 200, and drop it from cleanup.
pub async fn delete_record(
    ctx: &ContractContext,
    cleanup: &Cleanup,
    scenario: &str,
    url: &str,
) -> Result<(), ContractError> {
    let response = ctx.client.delete(url).await?;
    expect_status(scenario, &response, 200)?;
    cleanup.release(url);
    Ok(())
}

/// Assert that `url` answers 404.
pub async fn expect_absent(
    ctx: &ContractContext,
    scenario: &str,
    url: &str,
) -> Result<(), ContractError> {
    let response = ctx.client.get(url).await?;
    expect_status(scenario, &response, 404)
}

/// Keys set by a JSON object payload.
pub(crate) fn payload_keys(payload: &Value) -> Vec<String> {
    payload
        .as_object()
        .map(|body| body.keys().cloned().collect())
        .unwrap_or_default()
}
