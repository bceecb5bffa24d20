use async_trait::async_trait;

use crate::{RawResponse, TrError};

/// One fully built GET request: absolute URL, headers, and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrRequest {
    /// Absolute URL (base url + normalized path).
    pub url: String,
    /// Request headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
}

impl TrRequest {
    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query parameter lookup.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP GET capability used by the client.
///
/// Implementations return `Ok` for any response that arrived, including
/// non-2xx ones; the caller decides how to treat the status. Connection-level
/// failures map to `TrError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Issue one GET.
    async fn get(&self, req: &TrRequest) -> Result<RawResponse, TrError>;

    /// Release pooled resources. Called once when the owning client closes.
    async fn close(&self) {}
}
