//! Stock data service.
//!
//! Cache-aside retrieval on top of the provider client, the response parser,
//! the mock generator and the overview store:
//! - Quotes are always fetched live and never stored
//! - Overviews are served from the store while fresh, otherwise refetched
//! - Any provider-side failure is answered with mock data, which is never stored

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info, log};
use std::sync::Arc;

use stockiq_market_data::{
    MarketDataError, MockDataGenerator, Overview, ProviderClient, Quote, ResponseParser,
};

use super::constants::is_fresh;
use super::store::OverviewStore;
use super::symbol::normalize_symbol;
use crate::errors::Result;

/// Operations exposed to the HTTP layer.
#[async_trait]
pub trait StockDataServiceTrait: Send + Sync {
    /// Live quote for a symbol, or mock data if the provider cannot answer.
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;

    /// Overview for a symbol, from cache while fresh.
    async fn get_overview(&self, symbol: &str) -> Result<Overview>;

    /// Every cached overview, most recently updated first.
    fn list_overviews(&self) -> Result<Vec<Overview>>;

    /// Drop a cached overview. Returns true if one was cached.
    async fn evict_overview(&self, symbol: &str) -> Result<bool>;

    /// True when no cached overview exists or it is older than the staleness window.
    fn is_stale(&self, symbol: &str) -> Result<bool>;
}

pub struct StockDataService {
    provider: Arc<dyn ProviderClient>,
    store: Arc<dyn OverviewStore>,
    mock: MockDataGenerator,
}

impl StockDataService {
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        store: Arc<dyn OverviewStore>,
        mock: MockDataGenerator,
    ) -> Self {
        Self {
            provider,
            store,
            mock,
        }
    }

    async fn fetch_quote(&self, symbol: &str) -> std::result::Result<Quote, MarketDataError> {
        let raw = self.provider.fetch_quote(symbol).await?;
        Ok(ResponseParser::parse_quote(symbol, &raw.body)?)
    }

    async fn fetch_overview(&self, symbol: &str) -> std::result::Result<Overview, MarketDataError> {
        let raw = self.provider.fetch_overview(symbol).await?;
        Ok(ResponseParser::parse_overview(symbol, &raw.body)?)
    }

    /// Cached overview if one exists and is still fresh.
    fn fresh_cached(&self, symbol: &str) -> Result<Option<Overview>> {
        let Some(last_updated_at) = self.store.last_updated_at(symbol)? else {
            return Ok(None);
        };

        if !is_fresh(last_updated_at, Utc::now()) {
            debug!(
                "Cached overview for {} is stale (updated {})",
                symbol, last_updated_at
            );
            return Ok(None);
        }

        self.store.lookup(symbol)
    }

    fn report_fallback(&self, what: &str, symbol: &str, err: &MarketDataError) {
        log!(
            err.fallback_class().log_level(),
            "{} {} for {} unavailable ({}), returning mock data",
            self.provider.id(),
            what,
            symbol,
            err
        );
    }
}

#[async_trait]
impl StockDataServiceTrait for StockDataService {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = normalize_symbol(Some(symbol))?;

        match self.fetch_quote(&symbol).await {
            Ok(quote) => Ok(quote),
            Err(e) => {
                self.report_fallback("quote", &symbol, &e);
                Ok(self.mock.quote_for(&symbol))
            }
        }
    }

    async fn get_overview(&self, symbol: &str) -> Result<Overview> {
        let symbol = normalize_symbol(Some(symbol))?;

        if let Some(cached) = self.fresh_cached(&symbol)? {
            info!("Serving cached overview for {}", symbol);
            return Ok(cached);
        }

        info!("Fetching overview for {} from {}", symbol, self.provider.id());
        match self.fetch_overview(&symbol).await {
            Ok(overview) => {
                match self.store.upsert(&overview).await {
                    Ok(()) => info!("Stored overview for {}", symbol),
                    Err(e) => error!("Failed to store overview for {}: {}", symbol, e),
                }
                Ok(overview)
            }
            Err(e) => {
                self.report_fallback("overview", &symbol, &e);
                Ok(self.mock.overview_for(&symbol))
            }
        }
    }

    fn list_overviews(&self) -> Result<Vec<Overview>> {
        self.store.list_all()
    }

    async fn evict_overview(&self, symbol: &str) -> Result<bool> {
        let symbol = normalize_symbol(Some(symbol))?;
        let removed = self.store.delete(&symbol).await?;
        if removed {
            info!("Evicted cached overview for {}", symbol);
        }
        Ok(removed)
    }

    fn is_stale(&self, symbol: &str) -> Result<bool> {
        let symbol = normalize_symbol(Some(symbol))?;
        Ok(match self.store.last_updated_at(&symbol)? {
            Some(last_updated_at) => !is_fresh(last_updated_at, Utc::now()),
            None => true,
        })
    }
}
