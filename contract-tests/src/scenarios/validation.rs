//! Negative scenarios. The hosted mock API is permissive, so these
//! document what it accepts rather than assume strict validation.

use crate::checks::expect_status_in;
use crate::context::ContractContext;
use crate::outcome::{Outcome, ScenarioResult};
use harness_core::schema::{record_id, NewReview};
use harness_core::{ContractError, ResourceKind};

/// Statuses accepted as a validation rejection.
pub const REJECTION_STATUSES: [u16; 2] = [400, 422];

/// POST a review without its movie reference.
///
/// A 400/422 passes. A 201 is tolerated: the artifact is deleted and a
/// warning records that the backend does not enforce the reference. Any
/// other success still fails, but its record is cleaned up first.
pub async fn review_without_movie_ref(ctx: &ContractContext) -> ScenarioResult {
    let scenario = "reviews::missing_movie_ref";
    let schema = ctx.schema();

    ctx.scoped(|cleanup| async move {
        let payload = NewReview {
            movie_id: None,
            text: "Invalid review without movie reference".to_string(),
            rating: None,
        }
        .to_payload(schema);

        let response = ctx
            .client
            .post(ctx.endpoints.collection(ResourceKind::Reviews), &payload)
            .await?;

        let created = response
            .is_success()
            .then(|| response.json().ok())
            .flatten()
            .and_then(|record| record_id(&record));
        if let Some(id) = &created {
            cleanup.register(ctx.endpoints.item(ResourceKind::Reviews, id));
        }

        if let (201, Some(id)) = (response.status, created) {
            let warning = format!(
                "API accepted a review without '{}' (created id {})",
                schema.review_movie_ref, id
            );
            tracing::warn!(scenario, "{}", warning);
            return Ok(Outcome::Tolerated(warning));
        }

        expect_status_in(scenario, &response, &REJECTION_STATUSES)?;
        Ok::<_, ContractError>(Outcome::Passed)
    })
    .await
}
