//! Configuration types shared by the client and its collaborators.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{TrError, TrName};

/// Credentials, endpoint, and operation-id mapping for the remote API.
///
/// Usually read from a JSON file such as:
///
/// ```json
/// {
///   "base_url": "https://openapi.koreainvestment.com:9443",
///   "app_key": "...",
///   "app_secret": "...",
///   "tr_id": { "bid_ask_list": "FHKST01010200" }
/// }
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host, and optional port of the API; request paths are appended.
    pub base_url: String,
    /// Application key sent with every request.
    pub app_key: String,
    /// Application secret sent with every request.
    pub app_secret: String,
    /// Operation id header value per canonical TR name.
    #[serde(default)]
    pub tr_id: HashMap<String, String>,
}

impl ClientConfig {
    /// Conventional location of the config file relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "config/config.json";

    /// Create a config with an empty `tr_id` map.
    pub fn new(
        base_url: impl Into<String>,
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            tr_id: HashMap::new(),
        }
    }

    /// Map a TR name to its operation id.
    #[must_use]
    pub fn with_tr_id(mut self, name: TrName, tr_id: impl Into<String>) -> Self {
        self.tr_id.insert(name.as_str().to_string(), tr_id.into());
        self
    }

    /// Parse and validate a config from JSON text.
    ///
    /// # Errors
    /// Returns `Config` if the JSON does not match the expected shape or fails
    /// [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self, TrError> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| TrError::config(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a config file.
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or its content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TrError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TrError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Check that the endpoint is an absolute http(s) URL and credentials are present.
    ///
    /// # Errors
    /// Returns `Config` describing the first problem found.
    pub fn validate(&self) -> Result<(), TrError> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TrError::config(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.app_key.trim().is_empty() {
            return Err(TrError::config("app_key is empty"));
        }
        if self.app_secret.trim().is_empty() {
            return Err(TrError::config("app_secret is empty"));
        }
        Ok(())
    }

    /// Operation id configured for `name`, if any.
    #[must_use]
    pub fn tr_id_for(&self, name: TrName) -> Option<&str> {
        self.tr_id
            .get(name.as_str())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Join the base url with an already-normalized path (leading `/`).
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .field("tr_id", &self.tr_id)
            .finish()
    }
}

/// Tuning knobs for one batch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Maximum number of calls in flight at once.
    pub concurrency: usize,
    /// Number of symbols dispatched per chunk.
    pub batch_size: usize,
    /// Extra rounds after the first; each symbol is attempted at most `retry + 1` times.
    pub retry: usize,
    /// Pause after every chunk. Zero disables throttling.
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 5,
            batch_size: 50,
            retry: 1,
            delay: Duration::ZERO,
        }
    }
}

impl BatchOptions {
    /// Set the in-flight cap.
    #[must_use]
    pub const fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Set the chunk size.
    #[must_use]
    pub const fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub const fn retry(mut self, n: usize) -> Self {
        self.retry = n;
        self
    }

    /// Set the inter-chunk pause.
    #[must_use]
    pub const fn delay(mut self, d: Duration) -> Self {
        self.delay = d;
        self
    }

    /// Reject option values that would make a batch call meaningless.
    ///
    /// # Errors
    /// Returns `Config` if `batch_size` or `concurrency` is zero.
    pub fn validate(&self) -> Result<(), TrError> {
        if self.batch_size == 0 {
            return Err(TrError::config("batch_size must be positive"));
        }
        if self.concurrency == 0 {
            return Err(TrError::config("concurrency must be positive"));
        }
        Ok(())
    }
}
