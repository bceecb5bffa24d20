use std::sync::Arc;

use crate::helpers::config;
use kistr::{ClientConfig, StaticToken, TrClient, TrError, TrRegistry};
use kistr_mock::{DynamicMockTransport, MockTransport};

#[test]
fn build_requires_config_transport_and_tokens() {
    let err = TrClient::builder()
        .transport(Arc::new(MockTransport::new()))
        .token_provider(Arc::new(StaticToken::new("t")))
        .build()
        .err()
        .expect("missing config");
    assert!(matches!(err, TrError::Config(_)));

    let err = TrClient::builder()
        .config(config())
        .token_provider(Arc::new(StaticToken::new("t")))
        .build()
        .err()
        .expect("missing transport");
    assert!(matches!(err, TrError::Config(_)));

    let err = TrClient::builder()
        .config(config())
        .transport(Arc::new(MockTransport::new()))
        .build()
        .err()
        .expect("missing token provider");
    assert!(matches!(err, TrError::Config(_)));
}

#[test]
fn build_validates_config() {
    let err = TrClient::builder()
        .config(ClientConfig::new("ftp://openapi.test", "k", "s"))
        .transport(Arc::new(MockTransport::new()))
        .token_provider(Arc::new(StaticToken::new("t")))
        .build()
        .err()
        .expect("bad scheme");
    assert!(matches!(err, TrError::Config(_)));
}

#[test]
fn default_registry_has_builtin_trs() {
    let client = TrClient::builder()
        .config(config())
        .transport(Arc::new(MockTransport::new()))
        .token_provider(Arc::new(StaticToken::new("t")))
        .build()
        .unwrap();
    assert!(client.registry().contains("bid_ask_list"));
    assert_eq!(client.config().app_key, "test-key");
}

#[test]
fn shared_registry_is_reused() {
    let registry = Arc::new(TrRegistry::with_defaults());
    let client = TrClient::builder()
        .config(config())
        .transport(Arc::new(MockTransport::new()))
        .token_provider(Arc::new(StaticToken::new("t")))
        .shared_registry(Arc::clone(&registry))
        .build()
        .unwrap();
    assert!(std::ptr::eq(client.registry(), registry.as_ref()));
}

#[tokio::test]
async fn close_releases_transport() {
    let (transport, mock) = DynamicMockTransport::new_with_controller();
    let client = TrClient::builder()
        .config(config())
        .transport(transport)
        .token_provider(Arc::new(StaticToken::new("t")))
        .build()
        .unwrap();
    client.close().await;
    assert!(mock.is_closed());
}

#[tokio::test]
async fn static_token_rejects_empty_value() {
    let (transport, mock) = DynamicMockTransport::new_with_controller();
    let client = TrClient::builder()
        .config(config())
        .transport(transport)
        .token_provider(Arc::new(StaticToken::new("")))
        .build()
        .unwrap();
    let err = client.call("bid_ask_list", "005930").await.unwrap_err();
    assert!(matches!(err, TrError::Auth(_)));
    assert_eq!(mock.total_calls().await, 0);
}
