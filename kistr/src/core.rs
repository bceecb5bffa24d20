use std::sync::Arc;

use kistr_core::{ClientConfig, TokenProvider, TrError, TrRegistry, Transport};

/// Client that executes registered TRs against the remote API.
///
/// Holds the descriptor registry, credentials, a transport, and a token
/// provider. Dropping the client releases the transport; [`TrClient::close`]
/// does the same and additionally lets the transport flush explicitly.
pub struct TrClient {
    pub(crate) registry: Arc<TrRegistry>,
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) tokens: Arc<dyn TokenProvider>,
}

/// Builder for constructing a [`TrClient`].
pub struct TrClientBuilder {
    registry: Option<Arc<TrRegistry>>,
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl Default for TrClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrClientBuilder {
    /// Create an empty builder.
    ///
    /// Config, transport, and token provider are required; the registry
    /// defaults to [`TrRegistry::with_defaults`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: None,
            config: None,
            transport: None,
            tokens: None,
        }
    }

    /// Set credentials, base url, and operation ids.
    #[must_use]
    pub fn config(mut self, cfg: ClientConfig) -> Self {
        self.config = Some(cfg);
        self
    }

    /// Set the HTTP transport.
    #[must_use]
    pub fn transport(mut self, t: Arc<dyn Transport>) -> Self {
        self.transport = Some(t);
        self
    }

    /// Set the bearer token source.
    #[must_use]
    pub fn token_provider(mut self, p: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(p);
        self
    }

    /// Use a specific registry instead of the built-in defaults.
    ///
    /// Handy for tests and for applications that register their own TRs.
    #[must_use]
    pub fn registry(mut self, r: TrRegistry) -> Self {
        self.registry = Some(Arc::new(r));
        self
    }

    /// Share a registry with other clients.
    #[must_use]
    pub fn shared_registry(mut self, r: Arc<TrRegistry>) -> Self {
        self.registry = Some(r);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `Config` if config, transport, or token provider is missing, or
    /// if the config fails validation.
    pub fn build(self) -> Result<TrClient, TrError> {
        let config = self
            .config
            .ok_or_else(|| TrError::config("no client config; set one via config(...)"))?;
        config.validate()?;
        let transport = self
            .transport
            .ok_or_else(|| TrError::config("no transport; set one via transport(...)"))?;
        let tokens = self.tokens.ok_or_else(|| {
            TrError::config("no token provider; set one via token_provider(...)")
        })?;
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(TrRegistry::with_defaults()));

        Ok(TrClient {
            registry,
            config,
            transport,
            tokens,
        })
    }
}

impl TrClient {
    /// Start building a new client.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use kistr::{ClientConfig, StaticToken, TrClient};
    /// use kistr_http::HttpTransport;
    ///
    /// let client = TrClient::builder()
    ///     .config(ClientConfig::from_path(ClientConfig::DEFAULT_PATH)?)
    ///     .transport(Arc::new(HttpTransport::new()?))
    ///     .token_provider(Arc::new(StaticToken::new(token)))
    ///     .build()?;
    /// ```
    #[must_use]
    pub const fn builder() -> TrClientBuilder {
        TrClientBuilder::new()
    }

    /// The descriptor registry this client dispatches through.
    #[must_use]
    pub fn registry(&self) -> &TrRegistry {
        &self.registry
    }

    /// The active client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Close the client and release the transport.
    pub async fn close(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "kistr::client", transport = self.transport.name(), "closing client");
        self.transport.close().await;
    }
}
