use kistr::{BatchOptions, BidAskSummary};
use kistr_demos::common::build_client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the client (mock in CI when KISTR_DEMOS_USE_MOCK is set).
    let client = build_client()?;

    // 2. Batch settings. Raise `delay` when running many chunks against the live API.
    let opts = BatchOptions::default().concurrency(5).batch_size(50).retry(1);

    // 3. Fetch the ladder for a few listed stocks.
    let symbols = ["005930", "000660", "373220"];
    println!("Fetching bid/ask ladders for {symbols:?}...");
    let report = client.call_batch("bid_ask_list", symbols, opts).await?;

    // 4. Failures first, as JSON.
    if !report.errors.is_empty() {
        println!("Errors:\n{}", serde_json::to_string_pretty(&report.error_messages())?);
    }

    // 5. One row per symbol in input order.
    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>12} {:>12}",
        "symbol", "price", "ask1", "bid1", "total_ask", "total_bid"
    );
    for symbol in symbols {
        let Some(resp) = report.results.get(symbol) else {
            continue;
        };
        let s = BidAskSummary::from_response(resp);
        println!(
            "{symbol:<8} {:>10} {:>10} {:>10} {:>12} {:>12}",
            s.stck_prpr.as_deref().unwrap_or("-"),
            s.askp[0].as_deref().unwrap_or("-"),
            s.bidp[0].as_deref().unwrap_or("-"),
            s.total_askp_rsqn.as_deref().unwrap_or("-"),
            s.total_bidp_rsqn.as_deref().unwrap_or("-"),
        );
    }
    println!("ok={} failed={}", report.results.len(), report.errors.len());

    client.close().await;
    Ok(())
}
