//! Scenarios spanning both collections.

use super::{create_record, delete_record, expect_absent, fetch_record};
use crate::checks::{expect_reference, expect_status, expect_subset};
use crate::context::ContractContext;
use crate::outcome::{Outcome, ScenarioResult};
use harness_core::schema::{MoviePatch, NewMovie, NewReview};
use harness_core::{ContractError, ResourceKind};

/// Create a movie, attach a review to it, check the linkage, then delete
/// the review before the movie.
pub async fn movie_with_review(ctx: &ContractContext) -> ScenarioResult {
    let scenario = "integration::movie_with_review";
    let schema = ctx.schema();

    ctx.scoped(|cleanup| async move {
        let parent = NewMovie::new("Integration Test Movie", "Sci-Fi", 2023).to_payload(schema);
        let movie = create_record(ctx, &cleanup, scenario, ResourceKind::Movies, &parent).await?;

        let child = NewReview::new(
            movie.id.clone(),
            "This is a review for the integration test movie",
            5,
        )
        .to_payload(schema);
        let review = create_record(ctx, &cleanup, scenario, ResourceKind::Reviews, &child).await?;
        expect_reference(scenario, &review.record, &schema.review_movie_ref, &movie.id)?;

        let stored = fetch_record(ctx, scenario, &review.url).await?;
        expect_reference(scenario, &stored, &schema.review_movie_ref, &movie.id)?;

        delete_record(ctx, &cleanup, scenario, &review.url).await?;
        delete_record(ctx, &cleanup, scenario, &movie.url).await?;

        Ok::<_, ContractError>(Outcome::Passed)
    })
    .await
}

/// Create, read, update, delete and verify absence of a single movie.
pub async fn movie_lifecycle(ctx: &ContractContext) -> ScenarioResult {
    let scenario = "integration::movie_lifecycle";
    let schema = ctx.schema();

    ctx.scoped(|cleanup| async move {
        let payload = NewMovie::new("Lifecycle Test Movie", "Drama", 2024).to_payload(schema);
        let movie = create_record(ctx, &cleanup, scenario, ResourceKind::Movies, &payload).await?;

        let stored = fetch_record(ctx, scenario, &movie.url).await?;
        expect_subset(scenario, &stored, &payload)?;

        let patch = MoviePatch {
            title: Some("Updated Lifecycle Movie".to_string()),
            genre: Some("Comedy".to_string()),
            release_year: None,
        }
        .to_payload(schema);
        let response = ctx.client.put(&movie.url, &patch).await?;
        expect_status(scenario, &response, 200)?;
        expect_subset(scenario, &response.json()?, &patch)?;

        delete_record(ctx, &cleanup, scenario, &movie.url).await?;
        expect_absent(ctx, scenario, &movie.url).await?;

        Ok::<_, ContractError>(Outcome::Passed)
    })
    .await
}
