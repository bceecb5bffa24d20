//! Mock collaborators for kistr.
//!
//! - [`MockTransport`]: answers every request from static fixtures. Handy for
//!   CI-safe demos.
//! - [`dynamic::DynamicMockTransport`]: per-symbol scripted behavior driven by a
//!   controller, with request logging and concurrency accounting for tests.
//! - [`CountingTokenProvider`]: hands out numbered tokens and can fail on demand.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use kistr_core::{RawResponse, TokenProvider, TrError, TrRequest, Transport};

pub mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockTransport, MockBehavior};

/// Query parameter that carries the symbol for built-in TRs.
pub const DEFAULT_SYMBOL_PARAM: &str = "fid_input_iscd";

/// Mock transport for CI-safe demos. Serves deterministic fixture data.
///
/// Special symbols:
/// - `FAIL`: connection-level failure.
/// - `REJECT`: 200 response with a non-success `rt_cd`.
/// - `DOWN`: HTTP 503.
pub struct MockTransport;

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create the fixture-backed transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &'static str {
        "kistr-mock"
    }

    async fn get(&self, req: &TrRequest) -> Result<RawResponse, TrError> {
        let symbol = req.param(DEFAULT_SYMBOL_PARAM).unwrap_or_default();
        match symbol {
            "FAIL" => Err(TrError::Transport(format!(
                "forced failure: {}",
                req.url
            ))),
            "REJECT" => Ok(fixtures::status_failure(
                "EGW00121",
                "유효하지 않은 종목코드입니다.",
            )),
            "DOWN" => Ok(fixtures::http_error(503, "service unavailable")),
            s => Ok(fixtures::bid_ask_ok(s)),
        }
    }
}

/// Token provider that returns `token-1`, `token-2`, ... and counts calls.
///
/// The first `fail_first` calls, and every call past `succeed_until`, return an
/// `Auth` error instead.
#[derive(Debug)]
pub struct CountingTokenProvider {
    calls: AtomicUsize,
    fail_first: usize,
    succeed_until: usize,
}

impl Default for CountingTokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CountingTokenProvider {
    /// Always succeeds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: 0,
            succeed_until: usize::MAX,
        }
    }

    /// Fails the first `n` acquisitions, then succeeds.
    #[must_use]
    pub const fn failing_first(n: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: n,
            succeed_until: usize::MAX,
        }
    }

    /// Succeeds for the first `n` acquisitions, then fails.
    #[must_use]
    pub const fn failing_after(n: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: 0,
            succeed_until: n,
        }
    }

    /// Number of acquisitions so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for CountingTokenProvider {
    async fn access_token(&self) -> Result<String, TrError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.fail_first || n > self.succeed_until {
            return Err(TrError::Auth(format!("token endpoint unavailable (attempt {n})")));
        }
        Ok(format!("token-{n}"))
    }
}
