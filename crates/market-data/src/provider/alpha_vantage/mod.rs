//! Alpha Vantage provider client.
//!
//! Two endpoints of the single query URL are used:
//! - `GLOBAL_QUOTE` for live quotes
//! - `OVERVIEW` for company fundamentals
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute. Rate
//! limit replies arrive as HTTP 200 with a `Note`/`Information` envelope and
//! are classified by [`ResponseParser`], not here.

mod parser;

pub use parser::ResponseParser;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::provider::{ProviderClient, RawResponse};

pub const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Connect and read timeout for every provider call.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage HTTP client.
///
/// A missing or blank API key leaves the client unconfigured: every fetch
/// returns [`ProviderError::Unconfigured`] and nothing goes over the wire.
pub struct AlphaVantageClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a client for the public Alpha Vantage endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Create a client against a different query endpoint (used by tests).
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(PROVIDER_TIMEOUT)
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch(&self, function: &str, symbol: &str) -> Result<RawResponse, ProviderError> {
        debug_assert!(!symbol.is_empty(), "symbol must be normalized by the caller");

        let api_key = self.api_key.as_deref().ok_or(ProviderError::Unconfigured)?;

        let params = [("function", function), ("symbol", symbol), ("apikey", api_key)];
        let url = reqwest::Url::parse_with_params(&self.base_url, &params)
            .map_err(|e| ProviderError::Network(format!("Failed to build URL: {}", e)))?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(api_key, "***")
        );

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Alpha Vantage {} for {} answered HTTP {}", function, symbol, status);
            return Err(ProviderError::Unavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ProviderClient for AlphaVantageClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<RawResponse, ProviderError> {
        self.fetch("GLOBAL_QUOTE", symbol).await
    }

    async fn fetch_overview(&self, symbol: &str) -> Result<RawResponse, ProviderError> {
        self.fetch("OVERVIEW", symbol).await
    }
}
