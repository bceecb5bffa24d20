//! Domestic stock ask/bid ladder (`bid_ask_list`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::response::value_text;
use crate::{Params, TrName, TrResponse, TrSpec};

/// Descriptor for the five-level ask/bid ladder with expected execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidAskListSpec;

impl BidAskListSpec {
    /// Request path on the API host.
    pub const PATH: &'static str = "/uapi/domestic-stock/v1/quotations/inquire-asking-price-exp-ccn";
    /// Market division code for listed stocks.
    pub const MARKET_DIV_STOCK: &'static str = "J";

    /// Construct the descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TrSpec for BidAskListSpec {
    fn name(&self) -> TrName {
        TrName::BID_ASK_LIST
    }

    fn path(&self) -> &str {
        Self::PATH
    }

    fn params(&self, symbol: &str) -> Params {
        vec![
            (
                "fid_cond_mrkt_div_code".to_string(),
                Self::MARKET_DIV_STOCK.to_string(),
            ),
            ("fid_input_iscd".to_string(), symbol.to_string()),
        ]
    }
}

/// Flat projection of a `bid_ask_list` response.
///
/// Prices and residual quantities come from `output1`; the current price and
/// short code from `output2`. Values stay textual as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BidAskSummary {
    /// Ask prices, level 1 (best) to 5.
    pub askp: [Option<String>; 5],
    /// Bid prices, level 1 (best) to 5.
    pub bidp: [Option<String>; 5],
    /// Residual ask quantities per level.
    pub askp_rsqn: [Option<String>; 5],
    /// Residual bid quantities per level.
    pub bidp_rsqn: [Option<String>; 5],
    /// Total residual ask quantity.
    pub total_askp_rsqn: Option<String>,
    /// Total residual bid quantity.
    pub total_bidp_rsqn: Option<String>,
    /// Current price.
    pub stck_prpr: Option<String>,
    /// Short stock code echoed by the server.
    pub stck_shrn_iscd: Option<String>,
}

impl BidAskSummary {
    /// Extract the summary; absent or non-object sections and missing fields
    /// yield `None`.
    #[must_use]
    pub fn from_response(resp: &TrResponse) -> Self {
        let o1 = resp.output1.as_ref().and_then(Value::as_object);
        let o2 = resp.output2.as_ref().and_then(Value::as_object);
        let levels = |prefix: &str| -> [Option<String>; 5] {
            std::array::from_fn(|i| field(o1, &format!("{prefix}{}", i + 1)))
        };

        Self {
            askp: levels("askp"),
            bidp: levels("bidp"),
            askp_rsqn: levels("askp_rsqn"),
            bidp_rsqn: levels("bidp_rsqn"),
            total_askp_rsqn: field(o1, "total_askp_rsqn"),
            total_bidp_rsqn: field(o1, "total_bidp_rsqn"),
            stck_prpr: field(o2, "stck_prpr"),
            stck_shrn_iscd: field(o2, "stck_shrn_iscd"),
        }
    }

    /// Flatten into `(column, value)` pairs in report order.
    #[must_use]
    pub fn columns(&self) -> Vec<(String, Option<&str>)> {
        let mut out = Vec::with_capacity(24);
        for (prefix, vals) in [
            ("askp", &self.askp),
            ("bidp", &self.bidp),
            ("askp_rsqn", &self.askp_rsqn),
            ("bidp_rsqn", &self.bidp_rsqn),
        ] {
            for (i, v) in vals.iter().enumerate() {
                out.push((format!("{prefix}{}", i + 1), v.as_deref()));
            }
        }
        out.push(("total_askp_rsqn".into(), self.total_askp_rsqn.as_deref()));
        out.push(("total_bidp_rsqn".into(), self.total_bidp_rsqn.as_deref()));
        out.push(("stck_prpr".into(), self.stck_prpr.as_deref()));
        out.push(("stck_shrn_iscd".into(), self.stck_shrn_iscd.as_deref()));
        out
    }
}

fn field(section: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    section.and_then(|m| m.get(key)).and_then(value_text)
}
