use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kistr_core::{RawResponse, TrError, TrRequest, Transport};
use tokio::sync::Mutex;

use crate::DEFAULT_SYMBOL_PARAM;

/// Instruction for how a request for a given symbol should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided response (any status).
    Return(RawResponse),
    /// Fail at the connection level with the provided error.
    Fail(TrError),
    /// Hang indefinitely (simulate a stalled connection).
    Hang,
}

/// Per-symbol queue of behaviors. The last entry repeats once reached.
#[derive(Debug, Default)]
struct Script {
    steps: VecDeque<MockBehavior>,
}

impl Script {
    fn next(&mut self) -> Option<MockBehavior> {
        if self.steps.len() > 1 {
            self.steps.pop_front()
        } else {
            self.steps.front().cloned()
        }
    }
}

#[derive(Default)]
struct InternalState {
    scripts: HashMap<String, Script>,
    default: Option<MockBehavior>,
    latency: Duration,
    requests: Vec<TrRequest>,
    calls: HashMap<String, usize>,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    closed: AtomicBool,
}

/// Decrements the in-flight count even if the request future is dropped.
struct InFlight<'a>(&'a Counters);

impl<'a> InFlight<'a> {
    fn enter(c: &'a Counters) -> Self {
        let now = c.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        c.peak.fetch_max(now, Ordering::SeqCst);
        Self(c)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockController {
    /// Use `behavior` for every request for `symbol`.
    pub async fn set_behavior(&self, symbol: &str, behavior: MockBehavior) {
        self.set_script(symbol, vec![behavior]).await;
    }

    /// Play `steps` in order for `symbol`; the last one repeats.
    pub async fn set_script(&self, symbol: &str, steps: Vec<MockBehavior>) {
        let mut guard = self.state.lock().await;
        guard.scripts.insert(
            symbol.to_string(),
            Script {
                steps: steps.into(),
            },
        );
    }

    /// Behavior for symbols without a script.
    pub async fn set_default(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.default = Some(behavior);
    }

    /// Delay applied to every request before its behavior resolves.
    pub async fn set_latency(&self, latency: Duration) {
        let mut guard = self.state.lock().await;
        guard.latency = latency;
    }

    /// Copy of every request seen so far, in arrival order.
    pub async fn requests(&self) -> Vec<TrRequest> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Number of requests seen for `symbol`.
    pub async fn calls_for(&self, symbol: &str) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(symbol).copied().unwrap_or(0)
    }

    /// Total number of requests seen.
    pub async fn total_calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.requests.len()
    }

    /// Highest number of requests that were in flight at the same time.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    /// Whether `close` was called on the transport.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Clear scripts, the default behavior, and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.scripts.clear();
        guard.default = None;
        guard.requests.clear();
        guard.calls.clear();
        self.counters.peak.store(0, Ordering::SeqCst);
    }
}

/// A transport that defers all behavior to an external controller.
pub struct DynamicMockTransport {
    symbol_param: &'static str,
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockTransport {
    /// Create a mock that reads the symbol from `fid_input_iscd`.
    #[must_use]
    pub fn new_with_controller() -> (Arc<Self>, DynamicMockController) {
        Self::with_symbol_param(DEFAULT_SYMBOL_PARAM)
    }

    /// Create a mock that reads the symbol from a custom query parameter.
    #[must_use]
    pub fn with_symbol_param(symbol_param: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let counters = Arc::new(Counters::default());
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            counters: Arc::clone(&counters),
        };
        let me = Arc::new(Self {
            symbol_param,
            state,
            counters,
        });
        (me, controller)
    }
}

#[async_trait]
impl Transport for DynamicMockTransport {
    fn name(&self) -> &'static str {
        "kistr-mock-dynamic"
    }

    async fn get(&self, req: &TrRequest) -> Result<RawResponse, TrError> {
        let _guard = InFlight::enter(&self.counters);
        let symbol = req.param(self.symbol_param).unwrap_or_default().to_string();

        // Log and pick behavior without holding the lock across await points
        let (behavior, latency) = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            *guard.calls.entry(symbol.clone()).or_insert(0) += 1;
            let scripted = guard.scripts.get_mut(&symbol).and_then(Script::next);
            (scripted.or_else(|| guard.default.clone()), guard.latency)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match behavior {
            Some(MockBehavior::Return(resp)) => Ok(resp),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(TrError::Transport(format!(
                "no mock behavior for symbol '{symbol}'"
            ))),
        }
    }

    async fn close(&self) {
        self.counters.closed.store(true, Ordering::SeqCst);
    }
}
