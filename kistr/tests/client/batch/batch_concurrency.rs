use std::time::Duration;

use crate::helpers::{MockBehavior, bid_ask_ok, harness};
use kistr::BatchOptions;

fn symbols(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{:06}", 100_000 + i)).collect()
}

#[tokio::test(start_paused = true)]
async fn in_flight_calls_never_exceed_concurrency() {
    let h = harness();
    h.mock
        .set_default(MockBehavior::Return(bid_ask_ok("000000")))
        .await;
    h.mock.set_latency(Duration::from_millis(20)).await;

    let opts = BatchOptions::default().concurrency(3).batch_size(10);
    let report = h
        .client
        .call_batch("bid_ask_list", symbols(10), opts)
        .await
        .unwrap();

    assert_eq!(report.results.len(), 10);
    assert_eq!(h.mock.peak_in_flight(), 3);
}

#[tokio::test(start_paused = true)]
async fn chunks_do_not_overlap() {
    let h = harness();
    h.mock
        .set_default(MockBehavior::Return(bid_ask_ok("000000")))
        .await;
    h.mock.set_latency(Duration::from_millis(20)).await;

    // concurrency above chunk size: the chunk boundary is the effective cap
    let opts = BatchOptions::default().concurrency(8).batch_size(2);
    let report = h
        .client
        .call_batch("bid_ask_list", symbols(7), opts)
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(h.mock.peak_in_flight(), 2);
}

#[tokio::test(start_paused = true)]
async fn delay_is_applied_after_every_chunk() {
    let h = harness();
    h.mock
        .set_default(MockBehavior::Return(bid_ask_ok("000000")))
        .await;

    let opts = BatchOptions::default()
        .batch_size(2)
        .delay(Duration::from_secs(1));
    let start = tokio::time::Instant::now();
    let report = h
        .client
        .call_batch("bid_ask_list", symbols(5), opts)
        .await
        .unwrap();

    assert!(report.is_complete());
    // 5 symbols / 2 per chunk = 3 chunks
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(3), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn requests_go_out_in_input_order_per_chunk() {
    let h = harness();
    h.mock
        .set_default(MockBehavior::Return(bid_ask_ok("000000")))
        .await;

    let syms = symbols(6);
    let opts = BatchOptions::default().concurrency(1).batch_size(3);
    h.client
        .call_batch("bid_ask_list", syms.clone(), opts)
        .await
        .unwrap();

    let sent: Vec<String> = h
        .mock
        .requests()
        .await
        .iter()
        .filter_map(|r| r.param("fid_input_iscd").map(str::to_string))
        .collect();
    assert_eq!(sent, syms);
}
