pub mod client;

pub use client::{ApiClient, ApiResponse};
pub use reqwest::Method;
