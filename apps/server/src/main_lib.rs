use std::sync::Arc;

use crate::config::Config;
use stockiq_core::stocks::{StockDataService, StockDataServiceTrait};
use stockiq_market_data::{AlphaVantageClient, MockDataGenerator};
use stockiq_storage_sqlite::{db, OverviewRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub stock_service: Arc<dyn StockDataServiceTrait>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded through the subscriber's log bridge.
pub fn init_tracing() {
    let log_format = std::env::var("STOCKIQ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone())?;

    let overview_repository = Arc::new(OverviewRepository::new(pool, writer));

    if config.alpha_vantage_api_key.is_none() {
        tracing::info!("ALPHA_VANTAGE_API_KEY not set; serving mock market data");
    }
    let provider = Arc::new(AlphaVantageClient::new(
        config.alpha_vantage_api_key.clone(),
    ));

    let stock_service = Arc::new(StockDataService::new(
        provider,
        overview_repository,
        MockDataGenerator::new(),
    ));

    Ok(Arc::new(AppState { stock_service }))
}
