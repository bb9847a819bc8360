//! Overview storage trait.
//!
//! Overviews are persisted as an opaque serialized record keyed by symbol,
//! together with the time the store last wrote it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stockiq_market_data::Overview;

use crate::errors::Result;

/// Storage interface for cached overviews.
///
/// # Design Notes
///
/// - Async methods are used for writes, which go through the single writer
/// - Sync methods are used for point reads and listing
/// - The store assigns `last_updated_at` itself at write time
#[async_trait]
pub trait OverviewStore: Send + Sync {
    /// Insert or fully replace the overview for `overview.symbol`.
    async fn upsert(&self, overview: &Overview) -> Result<()>;

    /// Cached overview for a symbol, `None` if nothing is stored.
    fn lookup(&self, symbol: &str) -> Result<Option<Overview>>;

    /// All cached overviews, most recently updated first.
    fn list_all(&self) -> Result<Vec<Overview>>;

    /// Remove the cached overview. Returns true if a row existed.
    async fn delete(&self, symbol: &str) -> Result<bool>;

    /// When the symbol's overview was last written, `None` if absent.
    fn last_updated_at(&self, symbol: &str) -> Result<Option<DateTime<Utc>>>;
}
