//! Run-level reachability checks.

mod common;

use common::spawn_default;
use contract_tests::{Config, ContractContext, ContractError, FailureCategory};

// Nothing listens on port 1 and no fake ever binds it.
const DEAD_BASE_URL: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn unreachable_base_url_fails_fast_as_transport() {
    let err = ContractContext::connect(Config::for_base_url(DEAD_BASE_URL))
        .await
        .err()
        .expect("nothing is listening");
    assert!(matches!(err, ContractError::Unreachable { .. }), "got {:?}", err);
    assert_eq!(err.category(), FailureCategory::Transport);

    // Second attempt is served from the cached probe result.
    let again = ContractContext::connect(Config::for_base_url(DEAD_BASE_URL))
        .await
        .err()
        .expect("still unreachable");
    assert_eq!(again.to_string(), err.to_string());
}

#[tokio::test]
async fn reachable_fake_connects() {
    let api = spawn_default().await;
    let ctx = ContractContext::connect(api.config()).await.expect("reachable");
    assert_eq!(ctx.endpoints.base, api.address);
}

#[tokio::test]
async fn invalid_config_is_a_configuration_failure() {
    let err = ContractContext::connect(Config::for_base_url("mockapi.io"))
        .await
        .err()
        .expect("scheme is missing");
    assert_eq!(err.category(), FailureCategory::Configuration);
}
