//! StockIQ Market Data Crate
//!
//! This crate fetches quotes and company overviews from the upstream provider
//! and supplies deterministic mock data when the provider cannot.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  ProviderClient  |  (one HTTP call, no retries)
//! +------------------+
//!          |
//!          v  RawResponse
//! +------------------+
//! |  ResponseParser  |  (envelope detection, exact decimals)
//! +------------------+
//!          |
//!          v  Quote / Overview  or  ParseOutcome
//! +------------------+
//! |MockDataGenerator |  (used by the caller on any failure)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Live price snapshot, never cached
//! - [`Overview`] - Fundamentals snapshot with categorized ratios
//! - [`ProviderClient`] - Trait for the upstream source
//! - [`MarketDataError`] - Why a lookup fell back to mock data

pub mod errors;
pub mod mock;
pub mod models;
pub mod provider;

pub use errors::{FallbackClass, MarketDataError, ParseOutcome, ProviderError};
pub use mock::MockDataGenerator;
pub use models::{
    CategorizedMetrics, FinancialHealthMetrics, GrowthMetrics, Overview, OverviewMetrics,
    ProfitabilityMetrics, Quote, RiskMetrics, ValuationMetrics,
};
pub use provider::alpha_vantage::{AlphaVantageClient, ResponseParser, PROVIDER_TIMEOUT};
pub use provider::{ProviderClient, RawResponse};
