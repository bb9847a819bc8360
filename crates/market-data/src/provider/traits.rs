//! Provider client trait definitions.

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Raw HTTP answer from a provider, before any parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for the upstream quote/overview source.
///
/// Implementations make exactly one outbound call per invocation and never
/// retry. Callers pass a normalized (trimmed, uppercase) non-empty symbol.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockiq_market_data::errors::ProviderError;
/// use stockiq_market_data::provider::{ProviderClient, RawResponse};
///
/// struct Offline;
///
/// #[async_trait]
/// impl ProviderClient for Offline {
///     fn id(&self) -> &'static str {
///         "OFFLINE"
///     }
///
///     fn is_configured(&self) -> bool {
///         false
///     }
///
///     async fn fetch_quote(&self, _symbol: &str) -> Result<RawResponse, ProviderError> {
///         Err(ProviderError::Unconfigured)
///     }
///
///     async fn fetch_overview(&self, _symbol: &str) -> Result<RawResponse, ProviderError> {
///         Err(ProviderError::Unconfigured)
///     }
/// }
/// ```
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Whether a usable credential is present.
    ///
    /// When this returns false every fetch fails with
    /// [`ProviderError::Unconfigured`] without touching the network.
    fn is_configured(&self) -> bool;

    /// Fetch the raw live quote payload for a symbol.
    async fn fetch_quote(&self, symbol: &str) -> Result<RawResponse, ProviderError>;

    /// Fetch the raw company overview payload for a symbol.
    async fn fetch_overview(&self, symbol: &str) -> Result<RawResponse, ProviderError>;
}
