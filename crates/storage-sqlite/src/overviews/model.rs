//! Database model for cached stock overviews.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use stockiq_core::errors::{Error, Result};
use stockiq_market_data::Overview;

/// Database model for a cached overview.
///
/// `data` holds the whole overview as JSON, so new overview fields never need
/// a migration.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::stock_overviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockOverviewDB {
    pub symbol: String,
    pub data: String,
    pub last_updated_at: NaiveDateTime,
}

impl StockOverviewDB {
    pub fn from_domain(overview: &Overview, last_updated_at: NaiveDateTime) -> Result<Self> {
        Ok(Self {
            symbol: overview.symbol.clone(),
            data: serde_json::to_string(overview)?,
            last_updated_at,
        })
    }
}

// Conversion from DB model to Domain model
impl TryFrom<StockOverviewDB> for Overview {
    type Error = Error;

    fn try_from(db: StockOverviewDB) -> Result<Self> {
        let mut overview: Overview = serde_json::from_str(&db.data)?;
        // The key column is authoritative
        overview.symbol = db.symbol;
        Ok(overview)
    }
}
