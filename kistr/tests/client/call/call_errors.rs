use crate::helpers::{
    MockBehavior, NoPathSpec, config, harness, harness_with, http_error, status_failure,
};
use kistr::{ClientConfig, TrError, TrRegistry};
use kistr_mock::{CountingTokenProvider, fixtures};

#[tokio::test]
async fn unknown_tr_lists_available_names() {
    let h = harness();
    let err = h.client.call("nope", "005930").await.unwrap_err();
    assert_eq!(
        err,
        TrError::UnknownTr {
            name: "nope".into(),
            available: vec!["bid_ask_list".into()],
        }
    );
    assert_eq!(err.to_string(), "unknown TR 'nope'. Available: bid_ask_list");
    assert_eq!(h.mock.total_calls().await, 0);
}

#[tokio::test]
async fn missing_tr_id_fails_before_sending() {
    let cfg = ClientConfig::new("https://openapi.test", "k", "s");
    let h = harness_with(cfg, TrRegistry::with_defaults(), CountingTokenProvider::new());
    let err = h.client.call("bid_ask_list", "005930").await.unwrap_err();
    assert_eq!(err, TrError::missing_tr_id("bid_ask_list"));
    assert_eq!(err.to_string(), "missing tr_id['bid_ask_list'] in client configuration");
    assert_eq!(h.mock.total_calls().await, 0);
}

#[tokio::test]
async fn empty_path_fails_before_sending() {
    let mut registry = TrRegistry::new();
    registry.register(NoPathSpec).unwrap();
    let cfg = config().with_tr_id(kistr::TrName::new("no_path"), "X0001");
    let h = harness_with(cfg, registry, CountingTokenProvider::new());

    let err = h.client.call("no_path", "005930").await.unwrap_err();
    assert_eq!(err, TrError::empty_path("no_path"));
    assert_eq!(h.mock.total_calls().await, 0);
}

#[tokio::test]
async fn http_error_status_is_propagated() {
    let h = harness();
    h.mock
        .set_behavior("005930", MockBehavior::Return(http_error(500, "internal")))
        .await;
    let err = h.client.call("bid_ask_list", "005930").await.unwrap_err();
    assert_eq!(err, TrError::http(500, "internal"));
}

#[tokio::test]
async fn transport_failure_is_propagated() {
    let h = harness();
    h.mock
        .set_behavior(
            "005930",
            MockBehavior::Fail(TrError::Transport("connection reset".into())),
        )
        .await;
    let err = h.client.call("bid_ask_list", "005930").await.unwrap_err();
    assert!(matches!(err, TrError::Transport(_)));
}

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let h = harness();
    h.mock
        .set_behavior("005930", MockBehavior::Return(fixtures::garbage()))
        .await;
    let err = h.client.call("bid_ask_list", "005930").await.unwrap_err();
    assert!(matches!(err, TrError::Decode(_)));
}

#[tokio::test]
async fn non_success_status_is_returned_not_raised() {
    let h = harness();
    h.mock
        .set_behavior(
            "999999",
            MockBehavior::Return(status_failure("EGW00121", "invalid symbol")),
        )
        .await;
    let resp = h.client.call("bid_ask_list", "999999").await.unwrap();
    assert!(!resp.is_success());
    assert_eq!(resp.msg_cd, "EGW00121");
    assert_eq!(
        resp.status_error().map(|e| e.to_string()).as_deref(),
        Some("EGW00121 invalid symbol")
    );
}

#[tokio::test]
async fn token_failure_aborts_single_call() {
    let h = harness_with(
        config(),
        TrRegistry::with_defaults(),
        CountingTokenProvider::failing_first(1),
    );
    let err = h.client.call("bid_ask_list", "005930").await.unwrap_err();
    assert!(matches!(err, TrError::Auth(_)));
    assert_eq!(h.mock.total_calls().await, 0);
}
