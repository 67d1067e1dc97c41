//! harness-core: Shared infrastructure for the movies/reviews API contract tests.
pub mod config;
pub mod error;
pub mod fixture;
pub mod http;
pub mod observability;
pub mod schema;

pub use config::Config;
pub use error::{ContractError, FailureCategory};
pub use fixture::{Endpoints, ResourceKind};
pub use http::{ApiClient, ApiResponse};
pub use schema::Schema;
