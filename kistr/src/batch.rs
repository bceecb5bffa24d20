use std::collections::{BTreeMap, HashMap, HashSet};

use futures::stream::{self, StreamExt};
use kistr_core::{BatchOptions, TrError, TrResponse, TrSpec};

use crate::TrClient;

/// Outcome of a batch call.
///
/// Every distinct input symbol ends up in exactly one of `results` or `errors`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Successful responses (`rt_cd == "0"`) keyed by symbol.
    pub results: HashMap<String, TrResponse>,
    /// Last failure per symbol that never succeeded.
    pub errors: HashMap<String, TrError>,
    /// Number of rounds that dispatched at least one call.
    pub rounds: usize,
}

impl BatchReport {
    /// True when no symbol failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failures rendered as `symbol -> description`, sorted by symbol.
    #[must_use]
    pub fn error_messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(s, e)| (s.clone(), e.to_string()))
            .collect()
    }

    /// Split into `(results, errors)`.
    #[must_use]
    pub fn into_parts(self) -> (HashMap<String, TrResponse>, HashMap<String, TrError>) {
        (self.results, self.errors)
    }
}

type Outcome = (String, Result<TrResponse, TrError>);

impl TrClient {
    /// Execute one TR for many symbols with chunking, bounded concurrency, and retries.
    ///
    /// Behavior and trade-offs:
    /// - Symbols are de-duplicated (first occurrence keeps its position) and split
    ///   into chunks of `batch_size`. Chunks run one after another; within a chunk
    ///   at most `concurrency` calls are in flight and the chunk fully drains before
    ///   the next starts. `delay` is slept after every chunk.
    /// - One token is acquired per round and shared by every call in that round.
    ///   A token that expires mid-round is not refreshed until the next round.
    /// - Every per-symbol outcome other than success is recorded in
    ///   [`BatchReport::errors`]: transport, HTTP, decode, non-success `rt_cd`, and
    ///   addressing problems (`MissingTrId`, `EmptyPath`). Only retryable failures
    ///   are attempted again, for at most `retry` extra rounds; addressing
    ///   problems stay as recorded after the first round.
    /// - Partial failure never turns into `Err`.
    ///
    /// # Errors
    /// Returns `Config` for zero `batch_size`/`concurrency` (before any token or
    /// request), `UnknownTr` for an unregistered name, and the provider's error
    /// when a round cannot obtain its token.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "kistr::batch",
            skip_all,
            fields(tr = %name.as_ref(), concurrency = opts.concurrency, batch_size = opts.batch_size, retry = opts.retry),
        )
    )]
    pub async fn call_batch<I, S>(
        &self,
        name: impl AsRef<str>,
        symbols: I,
        opts: BatchOptions,
    ) -> Result<BatchReport, TrError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        opts.validate()?;
        let spec = self.registry.get(name)?;
        self.execute_batch(spec.as_ref(), symbols, opts).await
    }

    /// Batch engine over an already resolved descriptor. See [`TrClient::call_batch`].
    ///
    /// # Errors
    /// Same as [`TrClient::call_batch`], minus `UnknownTr`.
    pub async fn execute_batch<I, S>(
        &self,
        spec: &dyn TrSpec,
        symbols: I,
        opts: BatchOptions,
    ) -> Result<BatchReport, TrError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        opts.validate()?;

        let mut pending = distinct(symbols);
        let mut report = BatchReport::default();

        for attempt in 0..=opts.retry {
            if pending.is_empty() {
                break;
            }
            report.rounds += 1;

            #[cfg(feature = "tracing")]
            tracing::debug!(target: "kistr::batch", round = attempt, pending = pending.len(), "starting round");

            let round_errors = self.run_round(spec, &pending, opts, &mut report).await?;

            let failed: Vec<String> = pending
                .iter()
                .filter(|s| round_errors.get(*s).is_some_and(TrError::is_retryable))
                .cloned()
                .collect();
            report.errors.extend(round_errors);

            if failed.is_empty() || attempt == opts.retry {
                break;
            }
            pending = failed;
        }

        #[cfg(feature = "tracing")]
        for (symbol, err) in &report.errors {
            tracing::warn!(target: "kistr::batch", symbol = %symbol, error = %err, retryable = err.is_retryable(), "symbol failed after retries");
        }

        Ok(report)
    }

    /// One pass over `pending`. Successes go straight into `report`; failures are
    /// returned so the caller can decide what to retry.
    async fn run_round(
        &self,
        spec: &dyn TrSpec,
        pending: &[String],
        opts: BatchOptions,
        report: &mut BatchReport,
    ) -> Result<HashMap<String, TrError>, TrError> {
        let mut round_errors = HashMap::new();
        let token = self.tokens.access_token().await?;

        for (_index, chunk) in pending.chunks(opts.batch_size).enumerate() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "kistr::batch", chunk = _index, size = chunk.len(), "dispatching chunk");

            for (symbol, outcome) in self.run_chunk(spec, chunk, &token, opts.concurrency).await {
                match outcome {
                    Ok(resp) => {
                        report.errors.remove(&symbol);
                        report.results.insert(symbol, resp);
                    }
                    Err(e) => {
                        round_errors.insert(symbol, e);
                    }
                }
            }

            if !opts.delay.is_zero() {
                tokio::time::sleep(opts.delay).await;
            }
        }

        Ok(round_errors)
    }

    /// Run every symbol of a chunk with at most `concurrency` calls in flight and
    /// wait for all of them.
    async fn run_chunk(
        &self,
        spec: &dyn TrSpec,
        chunk: &[String],
        token: &str,
        concurrency: usize,
    ) -> Vec<Outcome> {
        stream::iter(chunk.iter().cloned())
            .map(move |symbol| async move {
                let outcome = match self.request(spec, &symbol, token).await {
                    Ok(resp) => match resp.status_error() {
                        None => Ok(resp),
                        Some(e) => Err(e),
                    },
                    Err(e) => Err(e),
                };
                (symbol, outcome)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await
    }
}

/// De-duplicate while keeping first-seen order.
fn distinct<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .map(Into::into)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
