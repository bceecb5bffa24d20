use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the kistr workspace.
///
/// Covers configuration problems, registry misuse, transport and decode
/// failures, token acquisition failures, and application-level status codes
/// reported by the remote API.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrError {
    /// Invalid client or batch configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// No operation id (`tr_id`) is configured for the named TR.
    #[error("missing tr_id['{name}'] in client configuration")]
    MissingTrId {
        /// Canonical TR name that was looked up.
        name: String,
    },

    /// The descriptor for the named TR declares an empty request path.
    #[error("missing path for TR spec '{name}'")]
    EmptyPath {
        /// Canonical TR name of the offending descriptor.
        name: String,
    },

    /// A descriptor with the same name is already registered.
    #[error("TR already registered: {name}")]
    DuplicateTr {
        /// Canonical TR name that was registered twice.
        name: String,
    },

    /// No descriptor matches the requested name or alias.
    #[error("unknown TR '{name}'. Available: {}", format_available(available))]
    UnknownTr {
        /// The name or alias as supplied by the caller.
        name: String,
        /// Canonical names currently registered, in registration order.
        available: Vec<String>,
    },

    /// The server answered with a non-2xx HTTP status.
    #[error("http status {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Full response body, for diagnosis.
        body: String,
    },

    /// Connection-level failure (DNS, TLS, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body is not valid structured data.
    #[error("decode error: {0}")]
    Decode(String),

    /// The bearer token could not be obtained.
    #[error("auth error: {0}")]
    Auth(String),

    /// The remote API decoded fine but reported a non-success status code.
    #[error("{code} {message}")]
    Status {
        /// `msg_cd` from the response body.
        code: String,
        /// `msg1` from the response body.
        message: String,
    },
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "<none>".to_string()
    } else {
        available.join(", ")
    }
}

impl TrError {
    /// Helper: build a `Config` error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Helper: build a `MissingTrId` error.
    pub fn missing_tr_id(name: impl Into<String>) -> Self {
        Self::MissingTrId { name: name.into() }
    }

    /// Helper: build an `EmptyPath` error.
    pub fn empty_path(name: impl Into<String>) -> Self {
        Self::EmptyPath { name: name.into() }
    }

    /// Helper: build an `Http` error from a status and body text.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Helper: build an application-level `Status` error.
    pub fn status(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Status {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns true if repeating the same call could plausibly succeed.
    ///
    /// Configuration and registry errors are deterministic and never retryable;
    /// everything that depends on the remote side or the network is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::Transport(_)
                | Self::Decode(_)
                | Self::Auth(_)
                | Self::Status { .. }
        )
    }
}

impl From<serde_json::Error> for TrError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<url::ParseError> for TrError {
    fn from(e: url::ParseError) -> Self {
        Self::Config(format!("invalid base_url: {e}"))
    }
}
