use kistr_core::{TrError, TrRequest, TrResponse, TrSpec};

use crate::TrClient;

impl TrClient {
    /// Execute one TR for one symbol, fetching a fresh token first.
    ///
    /// Behavior:
    /// - Transport, HTTP status, and decode failures are returned as `Err`;
    ///   there is no retry at this level.
    /// - A decoded response with a non-success `rt_cd` is returned as `Ok`;
    ///   check [`TrResponse::is_success`] before using the payload.
    ///
    /// # Errors
    /// Returns `UnknownTr` for an unregistered name, `Auth` if no token can be
    /// obtained, and any error from [`TrClient::request`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "kistr::client",
            skip_all,
            fields(tr = %name.as_ref(), symbol = %symbol),
        )
    )]
    pub async fn call(&self, name: impl AsRef<str>, symbol: &str) -> Result<TrResponse, TrError> {
        let spec = self.registry.get(name)?;
        let token = self.tokens.access_token().await?;
        self.request(spec.as_ref(), symbol, &token).await
    }

    /// Execute one TR for one symbol with a caller-supplied bearer token.
    ///
    /// This is the path shared by single calls and batch rounds.
    ///
    /// # Errors
    /// - `MissingTrId` / `EmptyPath` for configuration problems.
    /// - `Transport` for connection failures, `Http` for non-2xx responses.
    /// - `Decode` when the body is not structured data.
    pub async fn request(
        &self,
        spec: &dyn TrSpec,
        symbol: &str,
        token: &str,
    ) -> Result<TrResponse, TrError> {
        let req = self.build_request(spec, symbol, token)?;
        let raw = self.transport.get(&req).await?.error_for_status()?;
        spec.parse(&raw)
    }

    /// Assemble the GET request for `spec` and `symbol` without sending it.
    ///
    /// # Errors
    /// Returns `MissingTrId` if the config has no operation id for the TR and
    /// `EmptyPath` if the descriptor declares no path.
    pub fn build_request(
        &self,
        spec: &dyn TrSpec,
        symbol: &str,
        token: &str,
    ) -> Result<TrRequest, TrError> {
        let name = spec.name();
        let tr_id = self
            .config
            .tr_id_for(name)
            .ok_or_else(|| TrError::missing_tr_id(name.as_str()))?;
        let path = spec.build_path()?;

        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("appKey".to_string(), self.config.app_key.clone()),
            ("appSecret".to_string(), self.config.app_secret.clone()),
            ("tr_id".to_string(), tr_id.to_string()),
        ];

        Ok(TrRequest {
            url: self.config.url_for(&path),
            headers,
            query: spec.params(symbol),
        })
    }
}
