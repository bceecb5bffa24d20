use crate::{RawResponse, TrError, TrName, TrResponse};

/// Query parameters in the order they are sent.
pub type Params = Vec<(String, String)>;

/// Endpoint descriptor: everything the client needs to know about one TR.
///
/// Adding a new operation means implementing this trait and registering the
/// value with a [`TrRegistry`](crate::TrRegistry); the client itself does not
/// change.
pub trait TrSpec: Send + Sync {
    /// Canonical name; the registry key.
    fn name(&self) -> TrName;

    /// Request path as declared by the endpoint, leading `/` optional.
    fn path(&self) -> &str;

    /// Query parameters for one symbol.
    fn params(&self, symbol: &str) -> Params;

    /// Decode a raw response. The default covers every endpoint that follows
    /// the common body layout.
    ///
    /// # Errors
    /// Returns `TrError::Decode` when the body is not structured data.
    fn parse(&self, raw: &RawResponse) -> Result<TrResponse, TrError> {
        TrResponse::from_raw(raw)
    }

    /// Normalized request path with a leading `/`.
    ///
    /// # Errors
    /// Returns `TrError::EmptyPath` if [`path`](Self::path) is empty.
    fn build_path(&self) -> Result<String, TrError> {
        let path = self.path().trim();
        if path.is_empty() {
            return Err(TrError::empty_path(self.name().as_str()));
        }
        if path.starts_with('/') {
            Ok(path.to_string())
        } else {
            Ok(format!("/{path}"))
        }
    }
}
