//! Error types and fallback classification for the market data crate.
//!
//! This module provides:
//! - [`ProviderError`]: Transport-level failures talking to the upstream provider
//! - [`ParseOutcome`]: Non-success outcomes of parsing a provider payload
//! - [`MarketDataError`]: Umbrella over both, used by callers that fetch and parse in one step
//! - [`FallbackClass`]: Classification for how loudly a mock fallback should be reported

mod fallback;

pub use fallback::FallbackClass;

use thiserror::Error;

/// Failures that happen before a provider payload is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No API credential is configured. The request was never sent.
    #[error("Provider is not configured")]
    Unconfigured,

    /// The provider answered with a non-2xx status.
    #[error("Provider unavailable: HTTP {status}")]
    Unavailable {
        /// HTTP status returned by the provider
        status: u16,
    },

    /// The request exceeded the client timeout.
    #[error("Provider request timed out")]
    Timeout,

    /// Connection, TLS or body read failure.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Outcome of parsing a provider payload that did not yield a record.
///
/// The parser never substitutes mock data itself; it hands one of these
/// back so the caller decides what to do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The provider returned an explicit error envelope.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// The provider returned its rate-limit envelope.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The payload could not be turned into a record.
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Any reason a provider lookup did not produce a real record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Parse(#[from] ParseOutcome),
}

impl MarketDataError {
    /// Returns the fallback classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockiq_market_data::errors::{FallbackClass, MarketDataError, ProviderError};
    ///
    /// let error = MarketDataError::from(ProviderError::Unconfigured);
    /// assert_eq!(error.fallback_class(), FallbackClass::Expected);
    /// ```
    pub fn fallback_class(&self) -> FallbackClass {
        match self {
            Self::Provider(ProviderError::Unconfigured) => FallbackClass::Expected,
            Self::Parse(ParseOutcome::RateLimited(_)) => FallbackClass::Throttled,
            Self::Provider(_) => FallbackClass::Transient,
            Self::Parse(ParseOutcome::UpstreamError(_) | ParseOutcome::Malformed(_)) => {
                FallbackClass::BadPayload
            }
        }
    }

    /// True when falling back is the normal mode of operation, not an incident.
    pub fn is_expected(&self) -> bool {
        self.fallback_class() == FallbackClass::Expected
    }
}
