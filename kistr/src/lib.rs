//! kistr executes Korea Investment quote TRs one symbol at a time or in batches.
//!
//! Overview
//! - A [`TrRegistry`] maps TR names to [`TrSpec`] descriptors (path, query
//!   parameters, response decoding). New endpoints are added by registering a
//!   descriptor; the client itself never changes.
//! - [`TrClient::call`] builds the authenticated GET request, sends it through a
//!   [`Transport`], and decodes the result into a [`TrResponse`].
//! - [`TrClient::call_batch`] runs one TR over many symbols with chunking,
//!   bounded concurrency, per-symbol failure isolation, and retry rounds.
//!
//! Key behaviors and trade-offs
//! - Single calls surface transport, HTTP, and decode failures as `Err` but return
//!   non-success `rt_cd` responses as `Ok`; callers decide what to do with them.
//! - Batches record every per-symbol failure (including a non-success `rt_cd`
//!   or a missing `tr_id`) and never fail as a whole because of one symbol.
//!   Invalid batch options fail before the first request; a token that cannot
//!   be obtained fails the batch at the start of that round.
//! - Batches acquire one bearer token per round. Long rounds therefore rely on the
//!   token staying valid for the round's duration.
//! - Chunks are strictly sequential; a slow symbol holds back the next chunk.
//!   This keeps request bursts bounded by `batch_size` at the cost of throughput.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use kistr::{BatchOptions, BidAskSummary, ClientConfig, StaticToken, TrClient, TrName};
//! use kistr_http::HttpTransport;
//!
//! let client = TrClient::builder()
//!     .config(ClientConfig::from_path(ClientConfig::DEFAULT_PATH)?)
//!     .transport(Arc::new(HttpTransport::new()?))
//!     .token_provider(Arc::new(StaticToken::new(token)))
//!     .build()?;
//!
//! let one = client.call(TrName::BID_ASK_LIST, "005930").await?;
//! let report = client
//!     .call_batch("bid_ask_list", ["005930", "000660"], BatchOptions::default())
//!     .await?;
//! for (symbol, resp) in &report.results {
//!     println!("{symbol}: {:?}", BidAskSummary::from_response(resp).askp[0]);
//! }
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

mod batch;
mod call;
pub(crate) mod core;

pub use batch::BatchReport;
pub use crate::core::{TrClient, TrClientBuilder};

// Re-export core types for convenience
pub use kistr_core::{
    BatchOptions, BidAskListSpec, BidAskSummary, ClientConfig, Params, RawResponse,
    ResponseHeader, SUCCESS_RT_CD, StaticToken, TokenProvider, TrError, TrName, TrRegistry,
    TrRequest, TrResponse, TrSpec, Transport,
};
