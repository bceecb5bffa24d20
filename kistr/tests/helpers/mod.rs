// Re-export helpers so tests can `use crate::helpers::*;`
use std::sync::Arc;

use kistr::{ClientConfig, Params, TrClient, TrName, TrRegistry, TrSpec};
use kistr_mock::{CountingTokenProvider, DynamicMockController, DynamicMockTransport};

pub use kistr_mock::MockBehavior;
pub use kistr_mock::fixtures::{bid_ask_ok, http_error, status_failure};

pub const BASE_URL: &str = "https://openapi.test:9443";
pub const BID_ASK_TR_ID: &str = "FHKST01010200";

/// Config with the built-in TR mapped to its operation id.
pub fn config() -> ClientConfig {
    ClientConfig::new(BASE_URL, "test-key", "test-secret")
        .with_tr_id(TrName::BID_ASK_LIST, BID_ASK_TR_ID)
}

/// Everything a test needs to drive and observe a client.
pub struct Harness {
    pub client: TrClient,
    pub mock: DynamicMockController,
    pub tokens: Arc<CountingTokenProvider>,
}

pub fn harness() -> Harness {
    harness_with(config(), TrRegistry::with_defaults(), CountingTokenProvider::new())
}

pub fn harness_with(
    cfg: ClientConfig,
    registry: TrRegistry,
    tokens: CountingTokenProvider,
) -> Harness {
    let (transport, mock) = DynamicMockTransport::new_with_controller();
    let tokens = Arc::new(tokens);
    let client = TrClient::builder()
        .config(cfg)
        .transport(transport)
        .token_provider(tokens.clone())
        .registry(registry)
        .build()
        .expect("valid test client");
    Harness {
        client,
        mock,
        tokens,
    }
}

/// Descriptor whose path is blank.
pub struct NoPathSpec;

impl TrSpec for NoPathSpec {
    fn name(&self) -> TrName {
        TrName::new("no_path")
    }
    fn path(&self) -> &str {
        "   "
    }
    fn params(&self, symbol: &str) -> Params {
        vec![("fid_input_iscd".to_string(), symbol.to_string())]
    }
}
