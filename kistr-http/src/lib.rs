//! HTTP transport for kistr backed by `reqwest`.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use kistr_core::{RawResponse, TrError, TrRequest, Transport};

/// Sends kistr requests over a pooled `reqwest::Client`.
///
/// Any response that arrives is returned as-is, non-2xx included. Connection,
/// TLS, timeout, and body-read failures map to `TrError::Transport`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Per-request timeout used by [`HttpTransport::new`].
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Build a transport with [`DEFAULT_TIMEOUT`](Self::DEFAULT_TIMEOUT).
    ///
    /// # Errors
    /// Returns `Transport` if the underlying client cannot be constructed
    /// (e.g. the TLS backend fails to initialize).
    pub fn new() -> Result<Self, TrError> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Build a transport with a custom per-request timeout.
    ///
    /// # Errors
    /// Returns `Transport` if the underlying client cannot be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TrError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self { http })
    }

    /// Wrap an existing client, e.g. one with custom proxy or TLS settings.
    #[must_use]
    pub const fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn transport_err(e: &reqwest::Error) -> TrError {
    if e.is_timeout() {
        TrError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        TrError::Transport(format!("connection failed: {e}"))
    } else {
        TrError::Transport(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "kistr-http"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "kistr::http", skip_all, fields(url = %req.url))
    )]
    async fn get(&self, req: &TrRequest) -> Result<RawResponse, TrError> {
        let mut builder = self.http.get(&req.url).query(&req.query);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.send().await.map_err(|e| transport_err(&e))?;
        let status = resp.status().as_u16();
        let headers: Vec<(String, String)> = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = resp.bytes().await.map_err(|e| transport_err(&e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "kistr::http", status, bytes = body.len(), "response received");

        Ok(RawResponse::new(status, headers, body.to_vec()))
    }
}
