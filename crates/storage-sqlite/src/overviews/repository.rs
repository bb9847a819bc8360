use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::StockOverviewDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::stock_overviews;
use stockiq_core::errors::Result;
use stockiq_core::stocks::OverviewStore;
use stockiq_market_data::Overview;

pub struct OverviewRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OverviewRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        OverviewRepository { pool, writer }
    }

    /// Replace the row for `overview.symbol`, stamping it with `last_updated_at`.
    pub(crate) async fn save_at(
        &self,
        overview: &Overview,
        last_updated_at: NaiveDateTime,
    ) -> Result<()> {
        let row = StockOverviewDB::from_domain(overview, last_updated_at)?;
        self.writer
            .exec(move |conn| {
                diesel::replace_into(stock_overviews::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl OverviewStore for OverviewRepository {
    async fn upsert(&self, overview: &Overview) -> Result<()> {
        self.save_at(overview, Utc::now().naive_utc()).await?;
        debug!("Saved overview for {}", overview.symbol);
        Ok(())
    }

    fn lookup(&self, symbol: &str) -> Result<Option<Overview>> {
        let mut conn = get_connection(&self.pool)?;
        let row = stock_overviews::table
            .find(symbol)
            .select(StockOverviewDB::as_select())
            .first::<StockOverviewDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        row.map(Overview::try_from).transpose()
    }

    fn list_all(&self) -> Result<Vec<Overview>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = stock_overviews::table
            .select(StockOverviewDB::as_select())
            .order(stock_overviews::last_updated_at.desc())
            .load::<StockOverviewDB>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter().map(Overview::try_from).collect()
    }

    async fn delete(&self, symbol: &str) -> Result<bool> {
        let symbol = symbol.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(stock_overviews::table.find(&symbol))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected > 0)
            })
            .await
    }

    fn last_updated_at(&self, symbol: &str) -> Result<Option<DateTime<Utc>>> {
        let mut conn = get_connection(&self.pool)?;
        let stamp = stock_overviews::table
            .find(symbol)
            .select(stock_overviews::last_updated_at)
            .first::<NaiveDateTime>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(stamp.map(|t| t.and_utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use chrono::{Duration, Timelike};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    /// Creates a test repository backed by a temp database
    /// Returns the repository and temp dir (to keep it alive)
    async fn create_test_repository() -> (OverviewRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        // spawn_writer takes DbPool (not Arc<DbPool>)
        let writer = spawn_writer((*pool).clone()).expect("Failed to spawn writer");

        let repo = OverviewRepository::new(Arc::clone(&pool), writer);
        (repo, temp_dir)
    }

    fn full_overview(symbol: &str) -> Overview {
        let mut overview = Overview::new(symbol);
        overview.name = Some("Microsoft Corporation".to_string());
        overview.exchange = Some("NASDAQ".to_string());
        overview.currency = Some("USD".to_string());
        overview.country = Some("USA".to_string());
        overview.sector = Some("TECHNOLOGY".to_string());
        overview.industry = None;

        let m = &mut overview.metrics;
        m.valuation.pe_ratio = Some(dec!(35.12));
        m.valuation.price_to_book_ratio = Some(dec!(12.040));
        m.valuation.peg_ratio = None;
        m.profitability.return_on_equity_ttm = Some(dec!(0.355));
        m.profitability.return_on_assets_ttm = Some(dec!(0.147));
        m.profitability.profit_margin = Some(dec!(0.364));
        m.profitability.operating_margin_ttm = Some(dec!(0.446));
        m.financial_health.current_ratio = Some(dec!(1.27));
        m.financial_health.debt_to_equity_ratio = Some(dec!(0.29));
        m.financial_health.quick_ratio = Some(dec!(1.22));
        m.growth.quarterly_revenue_growth_yoy = Some(dec!(0.176));
        m.growth.quarterly_earnings_growth_yoy = Some(dec!(-0.05));
        m.risk.beta = Some(dec!(0.904));
        overview
    }

    #[tokio::test]
    async fn test_upsert_then_lookup_round_trips() {
        let (repo, _temp_dir) = create_test_repository().await;
        let overview = full_overview("MSFT");

        repo.upsert(&overview).await.expect("Failed to upsert");
        let loaded = repo
            .lookup("MSFT")
            .expect("Failed to lookup")
            .expect("Overview should exist");

        assert_eq!(loaded, overview);
        // Scale is preserved, not just the value
        assert_eq!(
            loaded.metrics.valuation.price_to_book_ratio.unwrap().to_string(),
            "12.040"
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_returns_none() {
        let (repo, _temp_dir) = create_test_repository().await;

        assert!(repo.lookup("NOPE").unwrap().is_none());
        assert!(repo.last_updated_at("NOPE").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_record() {
        let (repo, _temp_dir) = create_test_repository().await;

        let mut first = full_overview("MSFT");
        first.name = Some("First Name".to_string());
        repo.upsert(&first).await.unwrap();

        let mut second = Overview::new("MSFT");
        second.name = Some("Second Name".to_string());
        repo.upsert(&second).await.unwrap();

        let loaded = repo.lookup("MSFT").unwrap().unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Second Name"));
        // No field-level merge with the first record
        assert_eq!(loaded.metrics.risk.beta, None);
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_stamps_current_time() {
        let (repo, _temp_dir) = create_test_repository().await;
        let before = Utc::now() - Duration::seconds(1);

        repo.upsert(&Overview::new("AAPL")).await.unwrap();

        let stamp = repo.last_updated_at("AAPL").unwrap().unwrap();
        assert!(stamp >= before);
        assert!(stamp <= Utc::now() + Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_list_all_most_recent_first() {
        let (repo, _temp_dir) = create_test_repository().await;
        let now = Utc::now().naive_utc();

        repo.save_at(&Overview::new("AAPL"), now - Duration::hours(30))
            .await
            .unwrap();
        repo.save_at(&Overview::new("GOOGL"), now).await.unwrap();
        repo.save_at(&Overview::new("MSFT"), now - Duration::hours(2))
            .await
            .unwrap();

        let symbols: Vec<String> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|o| o.symbol)
            .collect();
        assert_eq!(symbols, vec!["GOOGL", "MSFT", "AAPL"]);
    }

    #[tokio::test]
    async fn test_stale_timestamp_is_preserved() {
        let (repo, _temp_dir) = create_test_repository().await;
        let stale = (Utc::now().naive_utc() - Duration::hours(25))
            .with_nanosecond(0)
            .unwrap();

        repo.save_at(&Overview::new("IBM"), stale).await.unwrap();

        let stamp = repo.last_updated_at("IBM").unwrap().unwrap();
        assert_eq!(stamp, stale.and_utc());
        assert!(!stockiq_core::stocks::is_fresh(stamp, Utc::now()));
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.upsert(&Overview::new("TSLA")).await.unwrap();

        assert!(repo.delete("TSLA").await.unwrap());
        assert!(repo.lookup("TSLA").unwrap().is_none());
        assert!(!repo.delete("TSLA").await.unwrap());
    }
}
