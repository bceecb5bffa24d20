use std::collections::HashSet;

use crate::helpers::{MockBehavior, bid_ask_ok, harness};
use kistr::{BatchOptions, TrError};
use proptest::prelude::*;

// Each symbol fails `failures` times before succeeding.
fn arb_plan() -> impl Strategy<Value = Vec<(String, usize)>> {
    proptest::collection::vec(("[A-E][0-9]", 0usize..4), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]
    #[test]
    fn every_symbol_is_accounted_for(
        plan in arb_plan(),
        retry in 0usize..3,
        concurrency in 1usize..4,
        batch_size in 1usize..5,
    ) {
        tokio_test::block_on(async move {
            let h = harness();
            // first occurrence of a symbol decides its script
            let mut seen = HashSet::new();
            let mut expected = Vec::new();
            for (sym, failures) in &plan {
                if !seen.insert(sym.clone()) {
                    continue;
                }
                let mut steps: Vec<MockBehavior> = (0..*failures)
                    .map(|i| MockBehavior::Fail(TrError::Transport(format!("fail {i}"))))
                    .collect();
                steps.push(MockBehavior::Return(bid_ask_ok(sym)));
                h.mock.set_script(sym, steps).await;
                expected.push((sym.clone(), *failures));
            }

            let opts = BatchOptions::default()
                .retry(retry)
                .concurrency(concurrency)
                .batch_size(batch_size);
            let symbols: Vec<String> = plan.iter().map(|(s, _)| s.clone()).collect();
            let report = h.client.call_batch("bid_ask_list", symbols, opts).await.unwrap();

            assert_eq!(report.results.len() + report.errors.len(), expected.len());
            for (sym, failures) in &expected {
                let in_results = report.results.contains_key(sym);
                let in_errors = report.errors.contains_key(sym);
                assert!(in_results ^ in_errors, "{sym} must be in exactly one map");
                assert_eq!(in_results, *failures <= retry, "{sym} outcome");
                let calls = h.mock.calls_for(sym).await;
                assert_eq!(calls, (*failures + 1).min(retry + 1), "{sym} attempts");
            }
            assert!(report.rounds <= retry + 1);
        });
    }
}
