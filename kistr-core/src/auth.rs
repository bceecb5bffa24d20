//! Bearer token source abstraction.

use std::fmt;

use async_trait::async_trait;

use crate::TrError;

/// Supplies the current bearer token.
///
/// Acquisition and caching live behind this trait; the client only asks for
/// "the token to use now" and never inspects it.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a bearer token valid for the next request(s).
    async fn access_token(&self) -> Result<String, TrError>;
}

/// A fixed token, e.g. one obtained out of band.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, TrError> {
        if self.token.is_empty() {
            return Err(TrError::Auth("static token is empty".to_string()));
        }
        Ok(self.token.clone())
    }
}
