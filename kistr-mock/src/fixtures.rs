//! Canned response bodies.

use kistr_core::RawResponse;
use serde_json::{Map, Value, json};

/// Operation id echoed in fixture headers.
pub const FIXTURE_TR_ID: &str = "FHKST01010200";

fn respond(status: u16, body: &Value) -> RawResponse {
    RawResponse::new(
        status,
        [
            ("content-type", "application/json; charset=utf-8"),
            ("tr_id", FIXTURE_TR_ID),
            ("tr_cont", ""),
            ("gt_uid", "MOCK0000000000000000000000000000"),
        ],
        body.to_string(),
    )
}

/// Deterministic reference price for a symbol, on a 100-won tick.
fn base_price(symbol: &str) -> u64 {
    let seed: u64 = symbol.bytes().map(u64::from).sum();
    10_000 + (seed % 400) * 100
}

/// Successful `bid_ask_list` body for `symbol`.
///
/// Ask levels step up from the reference price and bid levels step down, so
/// the best ask is always one tick above the best bid.
#[must_use]
pub fn bid_ask_ok(symbol: &str) -> RawResponse {
    let base = base_price(symbol);
    let mut output1 = Map::new();
    for level in 1..=10u64 {
        output1.insert(format!("askp{level}"), json!((base + level * 100).to_string()));
    }
    for level in 1..=10u64 {
        output1.insert(
            format!("bidp{level}"),
            json!((base + 100 - level * 100).to_string()),
        );
    }
    let mut ask_total = 0;
    let mut bid_total = 0;
    for level in 1..=10u64 {
        let ask = level * 1_000;
        let bid = (11 - level) * 900;
        ask_total += ask;
        bid_total += bid;
        output1.insert(format!("askp_rsqn{level}"), json!(ask.to_string()));
        output1.insert(format!("bidp_rsqn{level}"), json!(bid.to_string()));
    }
    output1.insert("total_askp_rsqn".into(), json!(ask_total.to_string()));
    output1.insert("total_bidp_rsqn".into(), json!(bid_total.to_string()));

    respond(
        200,
        &json!({
            "rt_cd": "0",
            "msg_cd": "MCA00000",
            "msg1": "정상처리 되었습니다.",
            "output1": output1,
            "output2": {
                "stck_prpr": (base + 100).to_string(),
                "stck_shrn_iscd": symbol,
                "antc_cnpr": base.to_string(),
            },
        }),
    )
}

/// A 200 response whose body reports an application-level failure.
#[must_use]
pub fn status_failure(msg_cd: &str, msg1: &str) -> RawResponse {
    respond(
        200,
        &json!({
            "rt_cd": "1",
            "msg_cd": msg_cd,
            "msg1": msg1,
        }),
    )
}

/// A non-2xx response with a plain-text body.
#[must_use]
pub fn http_error(status: u16, body: &str) -> RawResponse {
    RawResponse::new(status, [("content-type", "text/plain")], body.to_string())
}

/// A 200 response whose body is not JSON.
#[must_use]
pub fn garbage() -> RawResponse {
    RawResponse::new(200, [("content-type", "text/html")], "<html>maintenance</html>")
}
