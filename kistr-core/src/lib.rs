//! kistr-core
//!
//! Building blocks shared by the kistr client and its collaborators.
//!
//! - `response`: raw transport responses and the decoded [`TrResponse`] model.
//! - `spec`: the [`TrSpec`] endpoint descriptor trait.
//! - `registry`: the [`TrRegistry`] name → descriptor mapping.
//! - `transport` / `auth`: the [`Transport`] and [`TokenProvider`] seams the
//!   client calls out through.
//! - `bid_ask`: the built-in `bid_ask_list` descriptor and its summary projection.
//!
//! Async runtime
//! -------------
//! Collaborator traits are `async` (via `async-trait`) and the rest of the
//! workspace assumes a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Bearer token provider trait and a static implementation.
pub mod auth;
/// The `bid_ask_list` descriptor and summary.
pub mod bid_ask;
/// Descriptor registry.
pub mod registry;
/// Response model.
pub mod response;
/// Endpoint descriptor trait.
pub mod spec;
/// Transport trait and request type.
pub mod transport;

pub use auth::{StaticToken, TokenProvider};
pub use bid_ask::{BidAskListSpec, BidAskSummary};
pub use kistr_types::{BatchOptions, ClientConfig, TrError, TrName};
pub use registry::TrRegistry;
pub use response::{RawResponse, ResponseHeader, SUCCESS_RT_CD, TrResponse};
pub use spec::{Params, TrSpec};
pub use transport::{TrRequest, Transport};
