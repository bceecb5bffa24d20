use std::sync::Arc;

use kistr::{ClientConfig, StaticToken, TokenProvider, TrClient, TrError, TrName, Transport};

/// Set to run every demo against fixture data instead of the live API.
pub const USE_MOCK_ENV: &str = "KISTR_DEMOS_USE_MOCK";
/// Bearer token for live runs.
pub const TOKEN_ENV: &str = "KISTR_ACCESS_TOKEN";

fn use_mock() -> bool {
    std::env::var(USE_MOCK_ENV).is_ok()
}

/// Return a transport for demos.
///
/// # Errors
/// Returns `Transport` if the HTTP client cannot be built.
pub fn get_transport() -> Result<Arc<dyn Transport>, TrError> {
    if use_mock() {
        println!("--- (Using Mock Transport for CI) ---");
        Ok(Arc::new(kistr_mock::MockTransport::new()))
    } else {
        Ok(Arc::new(kistr_http::HttpTransport::new()?))
    }
}

/// Return a token provider for demos.
///
/// Live runs read the token from `KISTR_ACCESS_TOKEN`; a missing variable
/// surfaces as an `Auth` error on the first call.
#[must_use]
pub fn get_token_provider() -> Arc<dyn TokenProvider> {
    if use_mock() {
        Arc::new(StaticToken::new("mock-token"))
    } else {
        Arc::new(StaticToken::new(std::env::var(TOKEN_ENV).unwrap_or_default()))
    }
}

/// Return the client config for demos.
///
/// # Errors
/// Returns `Config` if the config file is missing or invalid on live runs.
pub fn get_config() -> Result<ClientConfig, TrError> {
    if use_mock() {
        Ok(
            ClientConfig::new("https://openapi.koreainvestment.com:9443", "mock-key", "mock-secret")
                .with_tr_id(TrName::BID_ASK_LIST, "FHKST01010200"),
        )
    } else {
        ClientConfig::from_path(ClientConfig::DEFAULT_PATH)
    }
}

/// Build a client from the demo config, transport, and token provider.
///
/// # Errors
/// Propagates config and transport construction failures.
pub fn build_client() -> Result<TrClient, TrError> {
    TrClient::builder()
        .config(get_config()?)
        .transport(get_transport()?)
        .token_provider(get_token_provider())
        .build()
}
