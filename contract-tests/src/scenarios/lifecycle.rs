//! CRUD lifecycle scenarios, written once for both collections.

use super::{create_record, delete_record, expect_absent, fetch_record, payload_keys};
use crate::checks::{
    expect_array, expect_fields_present, expect_id, expect_status, expect_subset,
    expect_untouched,
};
use crate::cleanup::Cleanup;
use crate::context::ContractContext;
use crate::outcome::{Outcome, ScenarioResult};
use harness_core::schema::{MoviePatch, NewMovie, NewReview, ReviewPatch};
use harness_core::{ContractError, ResourceKind};
use serde_json::Value;

fn scenario_name(kind: ResourceKind, step: &str) -> String {
    format!("{}::{}", kind, step)
}

/// Well-formed create payload for `kind`. Reviews get a parent movie of
/// their own, registered with the same cleanup scope.
async fn sample_payload(
    ctx: &ContractContext,
    cleanup: &Cleanup,
    scenario: &str,
    kind: ResourceKind,
) -> Result<Value, ContractError> {
    let schema = ctx.schema();
    match kind {
        ResourceKind::Movies => {
            Ok(NewMovie::new("Test Movie", "Action", 2023).to_payload(schema))
        }
        ResourceKind::Reviews => {
            let parent = NewMovie::new("Reviewed Movie", "Comedy", 2022).to_payload(schema);
            let movie =
                create_record(ctx, cleanup, scenario, ResourceKind::Movies, &parent).await?;
            Ok(NewReview::new(movie.id, "This is a test review", 5).to_payload(schema))
        }
    }
}

fn sample_patch(ctx: &ContractContext, kind: ResourceKind) -> Value {
    let schema = ctx.schema();
    match kind {
        ResourceKind::Movies => MoviePatch {
            title: Some("Updated Movie Title".to_string()),
            genre: Some("Drama".to_string()),
            release_year: None,
        }
        .to_payload(schema),
        ResourceKind::Reviews => ReviewPatch {
            text: Some("Updated review text".to_string()),
            rating: Some(4),
        }
        .to_payload(schema),
    }
}

/// GET the collection: 200, a JSON array, every element schema-valid.
///
/// An empty movie collection fails; an empty review collection is skipped
/// since reviews are not guaranteed to exist.
pub async fn list(ctx: &ContractContext, kind: ResourceKind) -> ScenarioResult {
    let scenario = scenario_name(kind, "list");

    let response = ctx.client.get(ctx.endpoints.collection(kind)).await?;
    expect_status(&scenario, &response, 200)?;
    let body = response.json()?;
    let records = expect_array(&scenario, &body)?;

    if records.is_empty() {
        return match kind {
            ResourceKind::Movies => Err(ContractError::assertion(
                &scenario,
                "collection is non-empty",
                "at least one record",
                0,
            )),
            ResourceKind::Reviews => Ok(Outcome::Skipped(
                "no reviews available to validate".to_string(),
            )),
        };
    }

    let required = ctx.schema().required_fields(kind);
    for record in records {
        expect_fields_present(&scenario, record, &required)?;
        expect_id(&scenario, record)?;
    }

    Ok(Outcome::Passed)
}

/// GET the first listed record by id and expect the same id back.
pub async fn get_by_id(ctx: &ContractContext, kind: ResourceKind) -> ScenarioResult {
    let scenario = scenario_name(kind, "get_by_id");

    let response = ctx.client.get(ctx.endpoints.collection(kind)).await?;
    expect_status(&scenario, &response, 200)?;
    let body = response.json()?;
    let records = expect_array(&scenario, &body)?;

    let Some(first) = records.first() else {
        return Ok(Outcome::Skipped(format!(
            "no {} available to fetch by id",
            kind
        )));
    };
    let id = expect_id(&scenario, first)?;

    let record = fetch_record(ctx, &scenario, &ctx.endpoints.item(kind, &id)).await?;
    let fetched = expect_id(&scenario, &record)?;
    if fetched != id {
        return Err(ContractError::assertion(&scenario, "fetched id", id, fetched));
    }

    Ok(Outcome::Passed)
}

/// POST a well-formed payload: 201, server-assigned id, submitted fields
/// echoed and identical on an immediate read-back.
pub async fn create(ctx: &ContractContext, kind: ResourceKind) -> ScenarioResult {
    let scenario = scenario_name(kind, "create");

    ctx.scoped(|cleanup| async move {
        let payload = sample_payload(ctx, &cleanup, &scenario, kind).await?;
        let created = create_record(ctx, &cleanup, &scenario, kind, &payload).await?;
        expect_subset(&scenario, &created.record, &payload)?;

        let stored = fetch_record(ctx, &scenario, &created.url).await?;
        expect_subset(&scenario, &stored, &payload)?;
        let stored_id = expect_id(&scenario, &stored)?;
        if stored_id != created.id {
            return Err(ContractError::assertion(
                &scenario,
                "id is stable across reads",
                &created.id,
                stored_id,
            ));
        }

        Ok::<_, ContractError>(Outcome::Passed)
    })
    .await
}

/// PUT a partial payload: 200, patched fields reflected, and every other
/// field of the full record unchanged.
pub async fn update(ctx: &ContractContext, kind: ResourceKind) -> ScenarioResult {
    let scenario = scenario_name(kind, "update");

    ctx.scoped(|cleanup| async move {
        let payload = sample_payload(ctx, &cleanup, &scenario, kind).await?;
        let created = create_record(ctx, &cleanup, &scenario, kind, &payload).await?;
        let before = fetch_record(ctx, &scenario, &created.url).await?;

        let patch = sample_patch(ctx, kind);
        let response = ctx.client.put(&created.url, &patch).await?;
        expect_status(&scenario, &response, 200)?;
        expect_subset(&scenario, &response.json()?, &patch)?;

        let after = fetch_record(ctx, &scenario, &created.url).await?;
        expect_subset(&scenario, &after, &patch)?;
        expect_untouched(&scenario, &before, &after, &payload_keys(&patch))?;

        Ok::<_, ContractError>(Outcome::Passed)
    })
    .await
}

/// DELETE a fresh record: 200, then 404 on every later read.
pub async fn delete(ctx: &ContractContext, kind: ResourceKind) -> ScenarioResult {
    let scenario = scenario_name(kind, "delete");

    ctx.scoped(|cleanup| async move {
        let payload = sample_payload(ctx, &cleanup, &scenario, kind).await?;
        let created = create_record(ctx, &cleanup, &scenario, kind, &payload).await?;

        delete_record(ctx, &cleanup, &scenario, &created.url).await?;
        expect_absent(ctx, &scenario, &created.url).await?;
        expect_absent(ctx, &scenario, &created.url).await?;

        Ok::<_, ContractError>(Outcome::Passed)
    })
    .await
}

/// GET an id that should never exist: 404, never 200.
pub async fn not_found(ctx: &ContractContext, kind: ResourceKind) -> ScenarioResult {
    let scenario = scenario_name(kind, "not_found");

    let url = ctx.endpoints.item(kind, &ctx.config.absent_id);
    expect_absent(ctx, &scenario, &url).await?;

    Ok(Outcome::Passed)
}
