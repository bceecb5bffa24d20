use kistr::{BatchOptions, TrName};
use kistr_demos::common::build_client;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,kistr=debug,kistr_http=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let client = build_client()?;

    // Single call
    let _ = client.call(TrName::BID_ASK_LIST, "005930").await?;

    // Small batch with one symbol the mock always fails
    let opts = BatchOptions::default().batch_size(2).retry(1);
    let report = client
        .call_batch("bid_ask_list", ["005930", "000660", "FAIL"], opts)
        .await?;
    tracing::info!(
        ok = report.results.len(),
        failed = report.errors.len(),
        rounds = report.rounds,
        "batch finished"
    );

    client.close().await;
    Ok(())
}
