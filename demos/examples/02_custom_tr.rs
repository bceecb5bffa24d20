use std::sync::Arc;

use kistr::{BatchOptions, BidAskListSpec, Params, TrClient, TrName, TrRegistry, TrSpec};
use kistr_demos::common::{get_config, get_token_provider, get_transport};

/// Current price inquiry, registered next to the built-in TRs.
struct InquirePrice;

impl TrSpec for InquirePrice {
    fn name(&self) -> TrName {
        TrName::new("inquire_price")
    }

    fn path(&self) -> &str {
        "uapi/domestic-stock/v1/quotations/inquire-price"
    }

    fn params(&self, symbol: &str) -> Params {
        vec![
            (
                "fid_cond_mrkt_div_code".to_string(),
                BidAskListSpec::MARKET_DIV_STOCK.to_string(),
            ),
            ("fid_input_iscd".to_string(), symbol.to_string()),
        ]
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Start from the defaults and add our own descriptor.
    let mut registry = TrRegistry::with_defaults();
    registry.register(InquirePrice)?;
    println!("Registered TRs: {:?}", registry.names().collect::<Vec<_>>());

    // 2. The operation id comes from config like any other TR.
    let config = get_config()?.with_tr_id(TrName::new("inquire_price"), "FHKST01010100");

    let client = TrClient::builder()
        .config(config)
        .transport(get_transport()?)
        .token_provider(get_token_provider())
        .shared_registry(Arc::new(registry))
        .build()?;

    // 3. Same client code path as the built-in TR.
    let report = client
        .call_batch("inquire_price", ["005930", "035420"], BatchOptions::default())
        .await?;
    for (symbol, resp) in &report.results {
        println!("{symbol}: rt_cd={} msg={}", resp.rt_cd, resp.msg1);
    }

    client.close().await;
    Ok(())
}
