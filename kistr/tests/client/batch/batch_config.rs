use crate::helpers::{NoPathSpec, config, harness, harness_with};
use kistr::{BatchOptions, ClientConfig, TrError, TrName, TrRegistry};
use kistr_mock::CountingTokenProvider;

#[tokio::test]
async fn zero_batch_size_is_rejected_before_any_work() {
    let h = harness();
    let err = h
        .client
        .call_batch("bid_ask_list", ["A"], BatchOptions::default().batch_size(0))
        .await
        .unwrap_err();
    assert!(matches!(err, TrError::Config(_)));
    assert_eq!(h.tokens.calls(), 0);
    assert_eq!(h.mock.total_calls().await, 0);
}

#[tokio::test]
async fn zero_concurrency_is_rejected_before_any_work() {
    let h = harness();
    let err = h
        .client
        .call_batch("bid_ask_list", ["A"], BatchOptions::default().concurrency(0))
        .await
        .unwrap_err();
    assert!(matches!(err, TrError::Config(_)));
    assert_eq!(h.tokens.calls(), 0);
}

#[tokio::test]
async fn unknown_tr_fails_the_batch() {
    let h = harness();
    let err = h
        .client
        .call_batch("missing", ["A"], BatchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TrError::UnknownTr { .. }));
    assert_eq!(h.tokens.calls(), 0);
}

#[tokio::test]
async fn missing_tr_id_is_reported_per_symbol_without_retry() {
    let cfg = ClientConfig::new("https://openapi.test", "k", "s");
    let h = harness_with(cfg, TrRegistry::with_defaults(), CountingTokenProvider::new());
    let report = h
        .client
        .call_batch("bid_ask_list", ["A", "B"], BatchOptions::default().retry(3))
        .await
        .unwrap();

    assert!(report.results.is_empty());
    assert_eq!(report.errors.len(), 2);
    for s in ["A", "B"] {
        assert_eq!(report.errors[s], TrError::missing_tr_id("bid_ask_list"));
    }
    // configuration problems are not retried
    assert_eq!(report.rounds, 1);
    assert_eq!(h.tokens.calls(), 1);
    assert_eq!(h.mock.total_calls().await, 0);
}

#[tokio::test]
async fn empty_path_is_reported_per_symbol_without_retry() {
    let mut registry = TrRegistry::new();
    registry.register(NoPathSpec).unwrap();
    let cfg = config().with_tr_id(TrName::new("no_path"), "X0001");
    let h = harness_with(cfg, registry, CountingTokenProvider::new());
    let report = h
        .client
        .call_batch("no_path", ["A"], BatchOptions::default().retry(2))
        .await
        .unwrap();

    assert_eq!(report.errors["A"], TrError::empty_path("no_path"));
    assert_eq!(report.rounds, 1);
    assert_eq!(h.mock.total_calls().await, 0);
}

#[tokio::test]
async fn execute_batch_accepts_a_resolved_descriptor() {
    let h = harness();
    h.mock
        .set_default(crate::helpers::MockBehavior::Return(
            crate::helpers::bid_ask_ok("A"),
        ))
        .await;
    let spec = h.client.registry().get(TrName::BID_ASK_LIST).unwrap();
    let report = h
        .client
        .execute_batch(spec.as_ref(), ["A"], BatchOptions::default())
        .await
        .unwrap();
    assert!(report.results.contains_key("A"));
}
